//! Example: three offline replicas of a settings store converging.

use lww_element_dict::prelude::*;

fn main() {
    println!("=== Offline settings sync (LWW-Element-Dict) ===\n");

    // Timestamps come from the application; here a shared logical counter.
    let mut phone: LWWDict<&str, &str, u64> = LWWDict::new();
    phone.add("theme", "light", 1).add("lang", "en", 2);

    let mut laptop = phone.clone();
    let mut tablet = phone.clone();

    // Concurrent edits while offline.
    phone.update("theme", "dark", 5);
    laptop.remove("lang", 4).add("font", "mono", 6);
    tablet.add("theme", "solarized", 5); // same instant as phone's edit

    for (name, replica) in [("phone", &phone), ("laptop", &laptop), ("tablet", &tablet)] {
        println!("{name:>6}: {:?}", replica.iter().collect::<Vec<_>>());
    }

    // Each device merges in a different order.
    let a = LWWDict::merge_all([&phone, &laptop, &tablet]);
    let b = tablet.merged(&laptop).merged(&phone);
    let mut c = laptop.clone();
    c.merge(&tablet);
    c.merge(&phone);

    println!("\n--- After sync ---");
    println!("state: {:?}", a.iter().collect::<Vec<_>>());
    println!("all replicas agree: {}", a == b && b == c);

    // "solarized" > "dark", so the default tie-break picks it.
    println!("theme: {:?}", a.lookup(&"theme"));
    println!("lang removed: {}", !a.contains_key(&"lang"));

    println!("\n=== Delta sync ===\n");
    let mut late = LWWDict::new();
    late.add("theme", "light", 1);
    let delta = a.delta(&late);
    println!("delta carries {} records/tombstones", delta.len());
    late.apply_delta(&delta);
    println!("late replica caught up: {}", late == a);
}
