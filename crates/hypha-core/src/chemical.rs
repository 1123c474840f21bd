//! Chemical layer definitions and the canonical chemical set.

/// Name of the glucose layer, depleted in lockstep with nutrient.
pub const GLUCOSE: &str = "glucose";

/// Name of the oxygen layer, seeded to a constant at initialization.
pub const OXYGEN: &str = "oxygen";

/// How a chemical layer is seeded when the field store (re)initializes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChemicalInit {
    /// Every cell starts at the active substrate's nutrient level.
    MirrorNutrient,
    /// Every cell starts at a fixed concentration.
    Constant(f32),
    /// Every cell starts at zero; only explicit commands mutate the layer.
    Zero,
}

/// Definition of one chemical concentration layer.
///
/// Chemicals are registered at world creation; `ChemicalId` is the index
/// into the registration list.
#[derive(Clone, Debug, PartialEq)]
pub struct ChemicalDef {
    /// Layer name, unique within a world.
    pub name: String,
    /// Seeding rule applied on every (re)initialization.
    pub init: ChemicalInit,
}

impl ChemicalDef {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, init: ChemicalInit) -> Self {
        Self {
            name: name.into(),
            init,
        }
    }
}

/// The canonical chemical set: glucose mirroring nutrient, oxygen at a
/// constant 100, and carbon dioxide starting empty.
pub fn canonical_chemicals() -> Vec<ChemicalDef> {
    vec![
        ChemicalDef::new(GLUCOSE, ChemicalInit::MirrorNutrient),
        ChemicalDef::new(OXYGEN, ChemicalInit::Constant(100.0)),
        ChemicalDef::new("carbon-dioxide", ChemicalInit::Zero),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_set_contains_glucose_and_oxygen() {
        let chems = canonical_chemicals();
        assert_eq!(chems[0].name, GLUCOSE);
        assert_eq!(chems[0].init, ChemicalInit::MirrorNutrient);
        assert_eq!(chems[1].name, OXYGEN);
        assert_eq!(chems[1].init, ChemicalInit::Constant(100.0));
    }

    #[test]
    fn non_canonical_layers_start_empty() {
        let chems = canonical_chemicals();
        assert!(chems[2..]
            .iter()
            .all(|c| c.init == ChemicalInit::Zero));
    }
}
