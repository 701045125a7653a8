use vedudb::Store;

fn main() -> Result<(), vedudb::Error> {
    env_logger::init();

    let path = std::env::temp_dir().join("vedudb_example_queries.json");
    let _ = std::fs::remove_file(&path);

    let db = Store::builder(&path).pretty(true).build()?;
    db.set("ducky", "pro gamer")?;
    db.set("bqini", "insane siege player")?;
    db.set("wins", 42)?;
    db.set("losses", 7)?;

    let numbers = db.filter(|v, _| v.is_number())?;
    println!("numbers      = {numbers:?}");

    let first_string = db.find(|v, _| v.is_string())?;
    println!("first string = {first_string:?}");

    let key = db.find_key(|v, _| v.as_i64() == Some(42))?;
    println!("key with 42  = {key:?}");

    println!("random       = {:?}", db.random()?);
    println!("count        = {}", db.count()?);

    // pretty mode keeps the file readable by hand
    println!("\nOn-disk JSON:\n{}", std::fs::read_to_string(db.path())?);

    let _ = std::fs::remove_file(&path);
    Ok(())
}
