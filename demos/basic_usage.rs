//! Basic usage example for packtree
//!
//! Run with: cargo run --example basic_usage

use packtree::*;
use serde_json::json;

fn print_tree<'de>(arena: &Arena<'de>, value: &Variant<'de>, indent: usize) {
    let pad = "  ".repeat(indent);
    match *value {
        Variant::Array(array) => {
            println!("{pad}array ({} elements)", array.len());
            for element in arena.elements(array) {
                print_tree(arena, element, indent + 1);
            }
        }
        Variant::Map(map) => {
            println!("{pad}map ({} entries)", map.len());
            for (key, v) in arena.entries(map) {
                println!("{pad}  {key:?}:");
                print_tree(arena, v, indent + 2);
            }
        }
        Variant::Str(s) => println!("{pad}{:?}", arena.text(s)),
        Variant::Bin(b) => println!("{pad}bin {:02x?}", arena.bytes(b)),
        other => println!("{pad}{other:?}"),
    }
}

fn main() -> Result<()> {
    println!("packtree Basic Usage Example");
    println!("============================");

    let doc = json!({
        "device": "thermostat",
        "firmware": [1, 4, 2],
        "readings": [21.5, 21.75, -3.0],
        "uptime": 4_294_967_298u64,
        "alarm": null
    });
    let bytes = rmp_serde::to_vec(&doc).expect("encode fixture");

    // Example 1: copy strings into the arena
    println!("\n1. Copying decode ({} input bytes):", bytes.len());
    {
        let mut arena = Arena::new();
        let root = deserialize(&bytes, &mut arena)?;
        print_tree(&arena, &root, 1);
        println!("  arena: {} bytes used, {} nodes", arena.used(), arena.node_count());
    }

    // Example 2: borrow strings from the input
    println!("\n2. In-place decode:");
    {
        let mut arena = Arena::new();
        let root = deserialize_in_place(&bytes, &mut arena)?;
        let device = arena
            .get(root.as_map().unwrap_or_default(), "device")
            .and_then(Variant::as_str_ref);
        if let Some(device) = device {
            println!("  device = {:?} (borrowed: {})", arena.text(device), device.is_borrowed());
        }
        println!("  arena: {} bytes used, {} nodes", arena.used(), arena.node_count());
    }

    // Example 3: emulate a small target
    println!("\n3. Without 64-bit integers or doubles:");
    {
        let mut arena = Arena::new();
        let mut cursor = SliceCursor::new(&bytes);
        let config = Config::new().without_int64().without_double();
        let root = deserialize_with(&mut cursor, &mut arena, Copying::new(), config)?;
        print_tree(&arena, &root, 1);
    }

    // Example 4: failures
    println!("\n4. Errors:");
    {
        let mut arena = Arena::new();
        let cases: [(&str, &[u8]); 4] = [
            ("reserved tag", &[0xc1]),
            ("truncated string", &[0xa5, b'h', b'i']),
            ("integer key", &[0x81, 0x01, 0xc0]),
            ("too deep", &[0x91; 12]),
        ];
        for (name, input) in cases {
            match deserialize(input, &mut arena) {
                Ok(value) => println!("  {name}: unexpected success {value:?}"),
                Err(e) => println!("  {name}: {e}"),
            }
        }

        let mut small = Arena::with_capacity(16);
        match deserialize(&bytes, &mut small) {
            Ok(_) => println!("  small arena: fits"),
            Err(e) => println!("  small arena: {e}"),
        }
    }

    // Example 5: a stream of values from a reader
    println!("\n5. Reading consecutive values:");
    {
        let mut stream = Vec::new();
        for n in 0..3 {
            stream.extend(rmp_serde::to_vec(&json!({ "n": n })).expect("encode fixture"));
        }
        let mut reader = std::io::Cursor::new(stream);
        for _ in 0..3 {
            let mut arena = Arena::new();
            let root = from_reader(&mut reader, &mut arena)?;
            let n = root.as_map().and_then(|m| arena.get(m, "n")).and_then(Variant::as_u64);
            println!("  n = {n:?}");
        }
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
