//! Dense per-cell field storage: nutrient, antifungal, and chemical layers.
//!
//! Every layer is a `Vec<f32>` over the dish bounding box in row-major
//! order. Layers are rebuilt in place whenever the substrate changes or
//! the world resets. Depletion is clamped: no cell ever goes negative,
//! no matter how many branches touch it in one tick.

use crate::dish::Dish;
use crate::error::FieldError;
use hypha_core::chemical::{ChemicalDef, ChemicalInit, GLUCOSE};
use hypha_core::id::ChemicalId;
use indexmap::IndexMap;

/// Minimum and maximum of one layer over in-bounds cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MinMax {
    /// Smallest value over in-bounds cells.
    pub min: f32,
    /// Largest value over in-bounds cells.
    pub max: f32,
}

impl MinMax {
    fn over<'a>(values: impl Iterator<Item = &'a f32>) -> Self {
        let mut range: Option<(f32, f32)> = None;
        for &v in values {
            range = Some(match range {
                None => (v, v),
                Some((min, max)) => (min.min(v), max.max(v)),
            });
        }
        let (min, max) = range.unwrap_or((0.0, 0.0));
        Self { min, max }
    }
}

/// Read-only summary of field state for external consumers.
///
/// Renderers use the per-layer ranges for overlay intensity scaling;
/// raw cell data stays inside the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSummary {
    /// The active substrate's initial nutrient level.
    pub substrate_nutrient: f32,
    /// Nutrient range over in-bounds cells.
    pub nutrient: MinMax,
    /// Antifungal range over in-bounds cells.
    pub antifungal: MinMax,
    /// Per-chemical ranges, in registration order.
    pub chemicals: Vec<(String, MinMax)>,
}

/// Dense field storage for one simulation world.
#[derive(Debug)]
pub struct FieldStore {
    dish: Dish,
    disk_mask: Vec<bool>,
    substrate_nutrient: f32,
    nutrient: Vec<f32>,
    antifungal: Vec<f32>,
    chemical_ids: IndexMap<String, ChemicalId>,
    chemical_inits: Vec<ChemicalInit>,
    chemical_layers: Vec<Vec<f32>>,
    glucose: Option<ChemicalId>,
}

impl FieldStore {
    /// Build a store over `dish`, registering `chemicals` in order and
    /// seeding every layer from `substrate_nutrient`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a chemical name appears twice.
    pub fn new(
        dish: Dish,
        chemicals: &[ChemicalDef],
        substrate_nutrient: f32,
    ) -> Result<Self, FieldError> {
        let cells = dish.cell_count();
        let mut chemical_ids = IndexMap::with_capacity(chemicals.len());
        let mut chemical_inits = Vec::with_capacity(chemicals.len());
        for (index, def) in chemicals.iter().enumerate() {
            let id = ChemicalId(index as u32);
            if chemical_ids.insert(def.name.clone(), id).is_some() {
                return Err(FieldError::DuplicateChemical {
                    name: def.name.clone(),
                });
            }
            chemical_inits.push(def.init);
        }
        let glucose = chemical_ids.get(GLUCOSE).copied();
        let mut store = Self {
            disk_mask: dish.disk_mask(),
            dish,
            substrate_nutrient: 0.0,
            nutrient: vec![0.0; cells],
            antifungal: vec![0.0; cells],
            chemical_ids,
            chemical_inits,
            chemical_layers: vec![vec![0.0; cells]; chemicals.len()],
            glucose,
        };
        store.reinitialize(substrate_nutrient);
        Ok(store)
    }

    /// Reseed every layer for a new substrate: nutrient to the substrate
    /// level, antifungal to zero, chemicals per their init rule.
    pub fn reinitialize(&mut self, substrate_nutrient: f32) {
        self.substrate_nutrient = substrate_nutrient;
        self.nutrient.fill(substrate_nutrient);
        self.antifungal.fill(0.0);
        for (layer, init) in self.chemical_layers.iter_mut().zip(&self.chemical_inits) {
            match init {
                ChemicalInit::MirrorNutrient => layer.fill(substrate_nutrient),
                ChemicalInit::Constant(value) => layer.fill(*value),
                ChemicalInit::Zero => layer.fill(0.0),
            }
        }
    }

    /// The dish geometry this store covers.
    pub fn dish(&self) -> &Dish {
        &self.dish
    }

    /// The active substrate's initial nutrient level.
    pub fn substrate_nutrient(&self) -> f32 {
        self.substrate_nutrient
    }

    /// Nutrient at a cell.
    pub fn nutrient_at(&self, index: usize) -> f32 {
        self.nutrient[index]
    }

    /// Antifungal concentration at a cell.
    pub fn antifungal_at(&self, index: usize) -> f32 {
        self.antifungal[index]
    }

    /// Subtract `amount` from the nutrient at a cell and, in lockstep,
    /// from the glucose layer if one is registered. Both are clamped to
    /// zero. Returns the nutrient actually consumed.
    pub fn deplete(&mut self, index: usize, amount: f32) -> f32 {
        let before = self.nutrient[index];
        let consumed = before.min(amount);
        self.nutrient[index] = (before - amount).max(0.0);
        if let Some(glucose) = self.glucose {
            let layer = &mut self.chemical_layers[glucose.0 as usize];
            layer[index] = (layer[index] - amount).max(0.0);
        }
        consumed
    }

    /// Resolve a chemical layer by name.
    pub fn chemical_id(&self, name: &str) -> Option<ChemicalId> {
        self.chemical_ids.get(name).copied()
    }

    /// Concentration of a chemical at a cell.
    pub fn chemical_at(&self, chemical: ChemicalId, index: usize) -> f32 {
        self.chemical_layers[chemical.0 as usize][index]
    }

    /// Set a chemical layer at one cell by resolved ID, clamped to >= 0.
    pub fn set_chemical_at(&mut self, chemical: ChemicalId, index: usize, value: f32) {
        self.chemical_layers[chemical.0 as usize][index] = value.max(0.0);
    }

    /// Set a chemical layer at one cell by name, clamped to >= 0.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `name` was never registered.
    pub fn set_chemical(&mut self, name: &str, index: usize, value: f32) -> Result<(), FieldError> {
        let id = self
            .chemical_ids
            .get(name)
            .copied()
            .ok_or_else(|| FieldError::UnknownChemical { name: name.into() })?;
        self.set_chemical_at(id, index, value);
        Ok(())
    }

    /// Min/max of every layer over in-bounds cells, plus the substrate
    /// nutrient level.
    pub fn summary(&self) -> FieldSummary {
        let masked = |layer: &[f32]| {
            MinMax::over(
                layer
                    .iter()
                    .zip(&self.disk_mask)
                    .filter_map(|(v, &valid)| valid.then_some(v)),
            )
        };
        FieldSummary {
            substrate_nutrient: self.substrate_nutrient,
            nutrient: masked(&self.nutrient),
            antifungal: masked(&self.antifungal),
            chemicals: self
                .chemical_ids
                .iter()
                .map(|(name, id)| (name.clone(), masked(&self.chemical_layers[id.0 as usize])))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypha_core::chemical::{canonical_chemicals, OXYGEN};

    fn store() -> FieldStore {
        let dish = Dish::new(20, 9.0).unwrap();
        FieldStore::new(dish, &canonical_chemicals(), 100.0).unwrap()
    }

    fn center_cell(store: &FieldStore) -> usize {
        let (cx, cy) = store.dish().center();
        store.dish().cell_in_disk(cx, cy).unwrap()
    }

    // ── initialization ─────────────────────────────────────────

    #[test]
    fn seeds_layers_per_init_rule() {
        let store = store();
        let cell = center_cell(&store);
        let glucose = store.chemical_id(GLUCOSE).unwrap();
        let oxygen = store.chemical_id(OXYGEN).unwrap();
        let co2 = store.chemical_id("carbon-dioxide").unwrap();
        assert_eq!(store.nutrient_at(cell), 100.0);
        assert_eq!(store.antifungal_at(cell), 0.0);
        assert_eq!(store.chemical_at(glucose, cell), 100.0);
        assert_eq!(store.chemical_at(oxygen, cell), 100.0);
        assert_eq!(store.chemical_at(co2, cell), 0.0);
    }

    #[test]
    fn rejects_duplicate_chemicals() {
        let dish = Dish::new(10, 4.0).unwrap();
        let defs = vec![
            ChemicalDef::new("glucose", ChemicalInit::MirrorNutrient),
            ChemicalDef::new("glucose", ChemicalInit::Zero),
        ];
        let err = FieldStore::new(dish, &defs, 50.0).unwrap_err();
        assert!(matches!(err, FieldError::DuplicateChemical { .. }));
    }

    #[test]
    fn reinitialize_resets_depleted_cells() {
        let mut store = store();
        let cell = center_cell(&store);
        store.deplete(cell, 30.0);
        store.reinitialize(70.0);
        let glucose = store.chemical_id(GLUCOSE).unwrap();
        assert_eq!(store.substrate_nutrient(), 70.0);
        assert_eq!(store.nutrient_at(cell), 70.0);
        assert_eq!(store.chemical_at(glucose, cell), 70.0);
    }

    // ── depletion ──────────────────────────────────────────────

    #[test]
    fn deplete_reduces_nutrient_and_glucose_in_lockstep() {
        let mut store = store();
        let cell = center_cell(&store);
        let glucose = store.chemical_id(GLUCOSE).unwrap();
        let consumed = store.deplete(cell, 0.5);
        assert_eq!(consumed, 0.5);
        assert_eq!(store.nutrient_at(cell), 99.5);
        assert_eq!(store.chemical_at(glucose, cell), 99.5);
    }

    #[test]
    fn deplete_clamps_at_zero() {
        let mut store = store();
        let cell = center_cell(&store);
        store.deplete(cell, 99.8);
        let consumed = store.deplete(cell, 0.5);
        assert_eq!(consumed, 0.2);
        assert_eq!(store.nutrient_at(cell), 0.0);
        let consumed = store.deplete(cell, 0.5);
        assert_eq!(consumed, 0.0);
        assert_eq!(store.nutrient_at(cell), 0.0);
    }

    #[test]
    fn deplete_leaves_oxygen_untouched() {
        let mut store = store();
        let cell = center_cell(&store);
        let oxygen = store.chemical_id(OXYGEN).unwrap();
        store.deplete(cell, 10.0);
        assert_eq!(store.chemical_at(oxygen, cell), 100.0);
    }

    // ── chemical commands ──────────────────────────────────────

    #[test]
    fn set_chemical_clamps_and_validates() {
        let mut store = store();
        let cell = center_cell(&store);
        store.set_chemical(OXYGEN, cell, -5.0).unwrap();
        let oxygen = store.chemical_id(OXYGEN).unwrap();
        assert_eq!(store.chemical_at(oxygen, cell), 0.0);

        let err = store.set_chemical("ethanol", cell, 1.0).unwrap_err();
        assert!(matches!(err, FieldError::UnknownChemical { .. }));
    }

    // ── summary ────────────────────────────────────────────────

    #[test]
    fn summary_reports_ranges_over_in_bounds_cells() {
        let mut store = store();
        let cell = center_cell(&store);
        store.deplete(cell, 40.0);
        let summary = store.summary();
        assert_eq!(summary.substrate_nutrient, 100.0);
        assert_eq!(summary.nutrient, MinMax { min: 60.0, max: 100.0 });
        assert_eq!(summary.antifungal, MinMax { min: 0.0, max: 0.0 });
        let glucose = &summary
            .chemicals
            .iter()
            .find(|(name, _)| name == GLUCOSE)
            .unwrap()
            .1;
        assert_eq!(*glucose, MinMax { min: 60.0, max: 100.0 });
    }

    #[test]
    fn summary_ignores_cells_outside_the_disk() {
        let mut store = store();
        // Corner cell 0 sits outside the disk; poke its oxygen directly.
        assert!(!store.dish().cell_center_in_disk(0));
        store.set_chemical(OXYGEN, 0, 9999.0).unwrap();
        let summary = store.summary();
        let oxygen = &summary
            .chemicals
            .iter()
            .find(|(name, _)| name == OXYGEN)
            .unwrap()
            .1;
        assert_eq!(*oxygen, MinMax { min: 100.0, max: 100.0 });
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn nutrient_never_negative(amounts in prop::collection::vec(0.0f32..5.0, 0..64)) {
                let mut store = store();
                let cell = center_cell(&store);
                let glucose = store.chemical_id(GLUCOSE).unwrap();
                for amount in amounts {
                    store.deplete(cell, amount);
                    prop_assert!(store.nutrient_at(cell) >= 0.0);
                    prop_assert!(store.chemical_at(glucose, cell) >= 0.0);
                }
            }

            #[test]
            fn consumed_never_exceeds_available(amount in 0.0f32..200.0) {
                let mut store = store();
                let cell = center_cell(&store);
                let before = store.nutrient_at(cell);
                let consumed = store.deplete(cell, amount);
                prop_assert!(consumed <= before);
                prop_assert!(consumed <= amount);
                prop_assert_eq!(store.nutrient_at(cell), (before - amount).max(0.0));
            }
        }
    }
}
