use fwps::Store;

fn main() {
    stderrlog::new().verbosity(3).init().unwrap();
    let args: Vec<String> = std::env::args().collect();

    let file = std::fs::read(&args[1]).unwrap();
    let store = Store::decode(&file, 1252).unwrap();

    println!("{} set(s)", store.set_count());
    for set in store.sets() {
        println!(
            "  fmtid={:02x?} named={} records={}",
            set.format_class_identifier(),
            set.is_named(),
            set.record_count()
        );
        for record in set.records() {
            if record.is_named() {
                let name = record.entry_name_utf8().unwrap().unwrap_or_default();
                println!("    [{name}] value_type=0x{:x}", record.value_type());
            } else {
                println!(
                    "    [{}] value_type=0x{:x}",
                    record.entry_type(),
                    record.value_type()
                );
            }
        }
    }
}
