//! Per-object-type field layouts.
//!
//! Field bit offsets, widths, and class/type codes are configuration data,
//! not code: each object constructor receives an [`ObjectLayout`] instead of
//! reading process-wide constants. [`LayoutTable::standard`] supplies the
//! RFC 5440 layouts for the object types this crate implements; callers may
//! register their own (for example, deserialized from external data).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ObjectError, Result};

/// Well-known object-class codes.
pub mod classes {
    /// BANDWIDTH object class (RFC 5440 §7.7).
    pub const BANDWIDTH: u8 = 5;
    /// METRIC object class (RFC 5440 §7.8).
    pub const METRIC: u8 = 6;
}

/// Returns a human-readable name for an object-class code.
pub fn class_name(class: u8) -> &'static str {
    match class {
        classes::BANDWIDTH => "BANDWIDTH",
        classes::METRIC => "METRIC",
        _ => "UNKNOWN",
    }
}

/// One named bit field inside an object body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, unique within its layout.
    pub name: String,
    /// Offset of the field's first bit from the start of the body.
    pub offset_bits: usize,
    /// Field width in bits.
    pub width_bits: usize,
}

impl FieldSpec {
    /// Convenience constructor.
    pub fn new(name: &str, offset_bits: usize, width_bits: usize) -> Self {
        Self {
            name: name.to_string(),
            offset_bits,
            width_bits,
        }
    }
}

/// The complete field layout for one object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLayout {
    /// Object-class code this layout applies to.
    pub class: u8,
    /// Object-type code this layout applies to.
    pub object_type: u8,
    /// Total body width in bits.
    pub body_width_bits: usize,
    /// Fields in declared bit order.
    pub fields: Vec<FieldSpec>,
}

impl ObjectLayout {
    /// Check the structural invariants.
    ///
    /// Fields must tile the declared body width exactly — sorted by offset,
    /// no gaps, no overlap (unused ranges are named reserved fields) — and
    /// each field must fit a 64-bit value.
    pub fn validate(&self) -> Result<()> {
        let mut cursor = 0usize;
        for field in &self.fields {
            if field.width_bits == 0 || field.width_bits > 64 {
                return Err(ObjectError::InvalidLayout {
                    reason: format!("field {:?} has width {} bits", field.name, field.width_bits),
                });
            }
            if field.offset_bits != cursor {
                return Err(ObjectError::InvalidLayout {
                    reason: format!(
                        "field {:?} declared at bit {} but the previous field ends at bit {}",
                        field.name, field.offset_bits, cursor
                    ),
                });
            }
            cursor += field.width_bits;
        }
        if cursor != self.body_width_bits {
            return Err(ObjectError::InvalidLayout {
                reason: format!(
                    "fields cover {} bits of a {}-bit body",
                    cursor, self.body_width_bits
                ),
            });
        }
        Ok(())
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Result<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| ObjectError::InvalidLayout {
                reason: format!("missing field {name:?}"),
            })
    }

    /// Check the layout declares exactly the named fields, in order.
    pub fn check_fields(&self, names: &[&str]) -> Result<()> {
        let declared: Vec<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();
        if declared != names {
            return Err(ObjectError::InvalidLayout {
                reason: format!("expected fields {names:?}, got {declared:?}"),
            });
        }
        Ok(())
    }

    /// Check the layout targets the given class/type pair.
    pub fn check_matches(&self, class: u8, object_type: u8) -> Result<()> {
        if self.class != class || self.object_type != object_type {
            return Err(ObjectError::InvalidLayout {
                reason: format!(
                    "layout is for class {} type {}, object is class {} type {}",
                    self.class, self.object_type, class, object_type
                ),
            });
        }
        Ok(())
    }
}

/// The standard BANDWIDTH layout: one 32-bit field.
pub fn bandwidth_layout() -> ObjectLayout {
    ObjectLayout {
        class: classes::BANDWIDTH,
        object_type: 1,
        body_width_bits: 32,
        fields: vec![FieldSpec::new("bandwidth", 0, 32)],
    }
}

/// The standard METRIC layout: reserved, flags (C/B in the low bits),
/// metric-type, metric-value.
pub fn metric_layout() -> ObjectLayout {
    ObjectLayout {
        class: classes::METRIC,
        object_type: 1,
        body_width_bits: 64,
        fields: vec![
            FieldSpec::new("reserved", 0, 16),
            FieldSpec::new("flags", 16, 8),
            FieldSpec::new("metric-type", 24, 8),
            FieldSpec::new("metric-value", 32, 32),
        ],
    }
}

/// Registry of layouts keyed by (class, type).
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    entries: Vec<ObjectLayout>,
}

impl LayoutTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard RFC 5440 layouts for the implemented object types.
    pub fn standard() -> Self {
        Self {
            entries: vec![bandwidth_layout(), metric_layout()],
        }
    }

    /// Register a layout, replacing any existing entry for the same
    /// class/type pair. The layout is validated first.
    pub fn insert(&mut self, layout: ObjectLayout) -> Result<()> {
        layout.validate()?;
        self.entries
            .retain(|l| (l.class, l.object_type) != (layout.class, layout.object_type));
        self.entries.push(layout);
        Ok(())
    }

    /// Look up the layout for a class/type pair.
    pub fn get(&self, class: u8, object_type: u8) -> Option<&ObjectLayout> {
        let found = self
            .entries
            .iter()
            .find(|l| l.class == class && l.object_type == object_type);
        trace!(
            class,
            object_type,
            known = found.is_some(),
            "layout lookup"
        );
        found
    }
}
