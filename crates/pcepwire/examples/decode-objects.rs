//! Decode object frames from raw wire bytes, the way a message decoder
//! hands them to this layer.
//!
//! Run with:
//!   cargo run --example decode-objects

use pcepwire::object::{LayoutTable, ObjectFrame, PcepObject};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let table = LayoutTable::standard();

    // A BANDWIDTH object (1_000_000) and a METRIC object (type 2, value 1500).
    let frames: [&[u8]; 2] = [
        &[0x05, 0x10, 0x00, 0x08, 0x00, 0x0f, 0x42, 0x40],
        &[
            0x06, 0x10, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x05, 0xdc,
        ],
    ];

    for wire in frames {
        let object = PcepObject::decode_bytes(wire, &table)?;
        eprintln!("{} -> {object}", object.tag());
        object.validate()?;
    }

    Ok(())
}
