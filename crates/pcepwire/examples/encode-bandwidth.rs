//! Encode a BANDWIDTH object and print its wire image.
//!
//! Run with:
//!   cargo run --example encode-bandwidth

use pcepwire::object::{
    bandwidth_layout, classes, BandwidthObject, ObjectFrame, ObjectHeader,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let header = ObjectHeader::new(classes::BANDWIDTH, 1)?;
    let mut object = BandwidthObject::new(header, &bandwidth_layout(), 1_000_000)?;
    object.header_mut().set_processing(true);

    eprintln!("{object}");
    eprintln!("bits:  {}", object.binary_info());

    let wire = object.frame_bytes()?;
    let hex: Vec<String> = wire.iter().map(|b| format!("{b:02x}")).collect();
    eprintln!("bytes: {} ({} bytes)", hex.join(" "), object.frame_byte_length());

    Ok(())
}
