//! End-to-end frame tests: wire fixtures, the length invariant, and
//! property tests over field mutation.

use pcepwire_bits::BitString;
use pcepwire_object::{
    aligned_byte_length, bandwidth_layout, classes, metric_layout, BandwidthObject, LayoutTable,
    MetricObject, ObjectFrame, ObjectHeader, ObjectLayout, PcepObject, HEADER_BIT_WIDTH,
};
use proptest::prelude::*;

fn bandwidth_object(value: u64) -> BandwidthObject {
    let header = ObjectHeader::new(classes::BANDWIDTH, 1).unwrap();
    BandwidthObject::new(header, &bandwidth_layout(), value).unwrap()
}

#[test]
fn bandwidth_wire_fixture() {
    let object = bandwidth_object(1_000_000);

    // class=5 | type=1 | flags clear | length=8, then 1_000_000 big-endian.
    let wire = object.frame_bytes().unwrap();
    assert_eq!(
        wire.as_ref(),
        &[0x05, 0x10, 0x00, 0x08, 0x00, 0x0F, 0x42, 0x40]
    );

    let decoded = PcepObject::decode_bytes(&wire, &LayoutTable::standard()).unwrap();
    assert_eq!(decoded, PcepObject::Bandwidth(object));
}

#[test]
fn metric_roundtrip_through_wire_bytes() {
    let header = ObjectHeader::new(classes::METRIC, 1).unwrap();
    let mut object = MetricObject::new(header, &metric_layout(), 2, 1_500).unwrap();
    object.set_computed_flag(true).unwrap();

    let wire = object.frame_bytes().unwrap();
    assert_eq!(wire.len(), 12);

    let decoded = PcepObject::decode_bytes(&wire, &LayoutTable::standard()).unwrap();
    assert_eq!(decoded, PcepObject::Metric(object));
}

#[test]
fn layouts_can_be_supplied_as_json() {
    let json = r#"{
        "class": 5,
        "object_type": 1,
        "body_width_bits": 16,
        "fields": [
            { "name": "bandwidth", "offset_bits": 0, "width_bits": 16 }
        ]
    }"#;
    let layout: ObjectLayout = serde_json::from_str(json).unwrap();

    let mut table = LayoutTable::new();
    table.insert(layout.clone()).unwrap();

    let header = ObjectHeader::new(classes::BANDWIDTH, 1).unwrap();
    let object = BandwidthObject::new(header, &layout, 65_535).unwrap();
    // 32 header + 16 body bits -> 6 bytes, word-aligned to 8
    assert_eq!(object.frame_byte_length(), 8);

    let wire = object.frame_bytes().unwrap();
    assert_eq!(wire.len(), 8);
    let decoded = PcepObject::decode_bytes(&wire, &table).unwrap();
    assert_eq!(decoded, PcepObject::Bandwidth(object));
}

proptest! {
    /// After any valid mutation: the value reads back, the frame length is
    /// the object's fixed total width, and the header length matches it.
    #[test]
    fn bandwidth_mutation_consistency(initial in any::<u32>(), next in any::<u32>()) {
        let mut object = bandwidth_object(initial as u64);
        object.set_bandwidth(next as u64).unwrap();

        prop_assert_eq!(object.bandwidth().unwrap(), next as u64);
        prop_assert_eq!(object.frame_byte_length(), 8);
        prop_assert!(object.validate().is_ok());
    }

    /// The length invariant holds at every observable point: declared bytes
    /// cover the actual bit width, with equality under word rounding.
    #[test]
    fn length_invariant(value in any::<u32>(), metric_value in any::<u32>()) {
        let bandwidth = bandwidth_object(value as u64);
        let header = ObjectHeader::new(classes::METRIC, 1).unwrap();
        let metric = MetricObject::new(
            header,
            &metric_layout(),
            1,
            metric_value as u64,
        )
        .unwrap();

        for object in [PcepObject::Bandwidth(bandwidth), PcepObject::Metric(metric)] {
            let total_bits = HEADER_BIT_WIDTH + object.body_bits().width();
            prop_assert!(object.frame_byte_length() * 8 >= total_bits);
            prop_assert_eq!(
                object.frame_byte_length(),
                aligned_byte_length(total_bits)
            );
            prop_assert_eq!(
                object.header().length_bytes() as usize,
                object.frame_byte_length()
            );
        }
    }

    /// Decoding the encoded frame image restores the object exactly.
    #[test]
    fn wire_roundtrip(value in any::<u32>()) {
        let object = bandwidth_object(value as u64);
        let wire = object.frame_bytes().unwrap();
        let decoded = PcepObject::decode_bytes(&wire, &LayoutTable::standard()).unwrap();
        prop_assert_eq!(decoded, PcepObject::Bandwidth(object));
    }

    /// Inputs that are not the declared body width never change the object.
    #[test]
    fn bad_body_width_never_partially_writes(value in any::<u32>(), width in 0usize..64) {
        prop_assume!(width != 32);
        let mut object = bandwidth_object(value as u64);
        let before = object.clone();

        prop_assert!(object.set_body_bits(&BitString::zeros(width)).is_err());
        prop_assert_eq!(object, before);
    }
}
