fn main() {
    match sarf::paths::find_database_path() {
        Some(v) => println!("Found: {}", v.display()),
        None => println!("Not found! Set {} to a database.", sarf::paths::DATABASE_ENV),
    }
}
