//! Substrate types and the substrate registry.
//!
//! A substrate is the named nutrient medium selected for a run. Its single
//! scalar, the initial nutrient level, seeds the nutrient field (and the
//! glucose layer that mirrors it) whenever the field store reinitializes.

use crate::error::RegistryError;
use indexmap::IndexMap;

/// One nutrient medium, keyed by name.
#[derive(Clone, Debug, PartialEq)]
pub struct SubstrateType {
    /// Substrate identifier, unique within the registry.
    pub name: String,
    /// Initial nutrient level seeded into every cell.
    pub nutrient: f32,
}

impl SubstrateType {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, nutrient: f32) -> Self {
        Self {
            name: name.into(),
            nutrient,
        }
    }
}

/// Order-preserving table of substrate types, validated at construction.
#[derive(Clone, Debug)]
pub struct SubstrateRegistry {
    substrates: IndexMap<String, SubstrateType>,
}

impl SubstrateRegistry {
    /// Build a registry, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the table is empty, a name appears twice, or a
    /// nutrient level is non-finite or negative.
    pub fn new(substrates: Vec<SubstrateType>) -> Result<Self, RegistryError> {
        if substrates.is_empty() {
            return Err(RegistryError::NoSubstrates);
        }
        let mut table = IndexMap::with_capacity(substrates.len());
        for substrate in substrates {
            if !substrate.nutrient.is_finite() || substrate.nutrient < 0.0 {
                return Err(RegistryError::InvalidSubstrate {
                    name: substrate.name,
                    reason: "nutrient level must be finite and >= 0".into(),
                });
            }
            let name = substrate.name.clone();
            if table.insert(name.clone(), substrate).is_some() {
                return Err(RegistryError::DuplicateSubstrate { name });
            }
        }
        Ok(Self { substrates: table })
    }

    /// The compiled-in default media.
    pub fn defaults() -> Self {
        Self::new(vec![
            SubstrateType::new("agar", 100.0),
            SubstrateType::new("grain", 90.0),
            SubstrateType::new("coffee-grounds", 80.0),
            SubstrateType::new("straw", 70.0),
            SubstrateType::new("hardwood-sawdust", 60.0),
        ])
        .expect("default substrate table is valid")
    }

    /// Look up a substrate by name.
    pub fn get(&self, name: &str) -> Option<&SubstrateType> {
        self.substrates.get(name)
    }

    /// Iterate substrates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SubstrateType> {
        self.substrates.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        let reg = SubstrateRegistry::defaults();
        assert_eq!(reg.get("agar").map(|s| s.nutrient), Some(100.0));
        assert!(reg.get("vermiculite").is_none());
        assert_eq!(reg.iter().count(), 5);
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(
            SubstrateRegistry::new(vec![]).unwrap_err(),
            RegistryError::NoSubstrates
        );
    }

    #[test]
    fn rejects_duplicate_name() {
        let err = SubstrateRegistry::new(vec![
            SubstrateType::new("agar", 100.0),
            SubstrateType::new("agar", 50.0),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateSubstrate { .. }));
    }

    #[test]
    fn rejects_negative_nutrient() {
        let err = SubstrateRegistry::new(vec![SubstrateType::new("void", -1.0)]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSubstrate { .. }));
    }
}
