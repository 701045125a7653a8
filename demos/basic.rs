use vedudb::Store;

fn main() -> Result<(), vedudb::Error> {
    env_logger::init();

    let path = std::env::temp_dir().join("vedudb_example_basic.json");
    let _ = std::fs::remove_file(&path);
    let db = Store::open(&path)?;

    db.set("bqini", "is pro")?;
    db.set("bqinimoney", 100)?;
    db.add("bqinimoney", 100.0)?;

    println!("bqini      = {:?}", db.fetch("bqini")?);
    println!("bqinimoney = {:?}", db.fetch("bqinimoney")?);

    db.subtract("bqinimoney", 25.0)?;
    println!("after subtract = {:?}", db.fetch("bqinimoney")?);

    println!("has bqini = {}", db.has("bqini")?);
    println!("count     = {}", db.count()?);

    db.remove("bqini")?;
    println!("after remove: count = {}", db.count()?);

    let _ = std::fs::remove_file(&path);
    Ok(())
}
