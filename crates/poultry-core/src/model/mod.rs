//! Data model for poultry production records
//!
//! - [`ProductionRecord`]: the stored entity (identifier + fields)
//! - [`ProductionFields`]: the attribute set, every value optional
//! - [`RecordPatch`]: a create/update payload that knows which keys were sent
//! - [`Field`]: enumeration of the attributes, with wire names and labels

pub mod coerce;
pub mod id;

pub use id::RecordId;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One attribute of a production record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProductionNumber,
    NumberOfHens,
    EggsLaid,
    QuantityOfMeatSold,
    FeedConsumption,
    WaterConsumption,
    MortalityRate,
    VaccinationDate,
}

impl Field {
    /// All attributes in form/table order
    pub const ALL: [Field; 8] = [
        Field::ProductionNumber,
        Field::NumberOfHens,
        Field::EggsLaid,
        Field::QuantityOfMeatSold,
        Field::FeedConsumption,
        Field::WaterConsumption,
        Field::MortalityRate,
        Field::VaccinationDate,
    ];

    /// JSON key on the wire
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::ProductionNumber => "productionNumber",
            Field::NumberOfHens => "numberOfHens",
            Field::EggsLaid => "eggsLaid",
            Field::QuantityOfMeatSold => "quantityOfMeatSold",
            Field::FeedConsumption => "feedConsumption",
            Field::WaterConsumption => "waterConsumption",
            Field::MortalityRate => "mortalityRate",
            Field::VaccinationDate => "vaccinationDate",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Field::ProductionNumber => "Production Number",
            Field::NumberOfHens => "Number of Hens",
            Field::EggsLaid => "Eggs Laid",
            Field::QuantityOfMeatSold => "Quantity of Meat Sold",
            Field::FeedConsumption => "Feed Consumption (kg)",
            Field::WaterConsumption => "Water Consumption (litres)",
            Field::MortalityRate => "Mortality Rate (%)",
            Field::VaccinationDate => "Vaccination Date",
        }
    }
}

/// Attribute values of a production record
///
/// Missing values are omitted from the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_hens: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eggs_laid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_of_meat_sold: Option<f64>,
    /// Kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_consumption: Option<f64>,
    /// Litres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_consumption: Option<f64>,
    /// Percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mortality_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaccination_date: Option<NaiveDate>,
}

impl ProductionFields {
    /// Build a fresh field set from a create payload
    pub fn from_patch(patch: &RecordPatch) -> Self {
        let mut fields = Self::default();
        fields.apply(patch);
        fields
    }

    /// Apply the keys present in `patch`, leaving the rest untouched
    pub fn apply(&mut self, patch: &RecordPatch) {
        fn set<T: Copy>(slot: &mut Option<T>, update: Option<Option<T>>) {
            if let Some(value) = update {
                *slot = value;
            }
        }

        set(&mut self.production_number, patch.production_number);
        set(&mut self.number_of_hens, patch.number_of_hens);
        set(&mut self.eggs_laid, patch.eggs_laid);
        set(&mut self.quantity_of_meat_sold, patch.quantity_of_meat_sold);
        set(&mut self.feed_consumption, patch.feed_consumption);
        set(&mut self.water_consumption, patch.water_consumption);
        set(&mut self.mortality_rate, patch.mortality_rate);
        set(&mut self.vaccination_date, patch.vaccination_date);
    }

    /// Numeric value of a field (`None` for the date field or a missing value)
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::ProductionNumber => self.production_number,
            Field::NumberOfHens => self.number_of_hens,
            Field::EggsLaid => self.eggs_laid,
            Field::QuantityOfMeatSold => self.quantity_of_meat_sold,
            Field::FeedConsumption => self.feed_consumption,
            Field::WaterConsumption => self.water_consumption,
            Field::MortalityRate => self.mortality_rate,
            Field::VaccinationDate => None,
        }
    }

    /// Text rendering of a field, empty when missing
    pub fn display(&self, field: Field) -> String {
        match field {
            Field::VaccinationDate => self
                .vaccination_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            numeric => self.number(numeric).map(|n| n.to_string()).unwrap_or_default(),
        }
    }
}

/// A production record as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: ProductionFields,
}

impl ProductionRecord {
    pub fn new(id: RecordId, fields: ProductionFields) -> Self {
        Self { id, fields }
    }
}

/// Create/update payload
///
/// The outer `Option` records whether the key was sent; the inner one whether
/// it carried a value. `Some(None)` clears a field on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_number: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_hens: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eggs_laid: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_of_meat_sold: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_consumption: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_consumption: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortality_rate: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccination_date: Option<Option<NaiveDate>>,
}

impl RecordPatch {
    /// Coerce a JSON object into a patch
    ///
    /// Unknown keys (`_id`, `__v`, ...) are ignored.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::invalid_payload("expected a JSON object"))?;

        let mut patch = Self::default();
        for field in Field::ALL {
            let Some(raw) = object.get(field.wire_name()) else {
                continue;
            };
            patch.set(field, raw)?;
        }
        Ok(patch)
    }

    /// Patch that sets every field to the values of `fields`
    pub fn replace_all(fields: &ProductionFields) -> Self {
        Self {
            production_number: Some(fields.production_number),
            number_of_hens: Some(fields.number_of_hens),
            eggs_laid: Some(fields.eggs_laid),
            quantity_of_meat_sold: Some(fields.quantity_of_meat_sold),
            feed_consumption: Some(fields.feed_consumption),
            water_consumption: Some(fields.water_consumption),
            mortality_rate: Some(fields.mortality_rate),
            vaccination_date: Some(fields.vaccination_date),
        }
    }

    fn set(&mut self, field: Field, raw: &Value) -> Result<()> {
        let name = field.wire_name();
        match field {
            Field::ProductionNumber => self.production_number = Some(coerce::number(name, raw)?),
            Field::NumberOfHens => self.number_of_hens = Some(coerce::number(name, raw)?),
            Field::EggsLaid => self.eggs_laid = Some(coerce::number(name, raw)?),
            Field::QuantityOfMeatSold => {
                self.quantity_of_meat_sold = Some(coerce::number(name, raw)?)
            }
            Field::FeedConsumption => self.feed_consumption = Some(coerce::number(name, raw)?),
            Field::WaterConsumption => self.water_consumption = Some(coerce::number(name, raw)?),
            Field::MortalityRate => self.mortality_rate = Some(coerce::number(name, raw)?),
            Field::VaccinationDate => self.vaccination_date = Some(coerce::date(name, raw)?),
        }
        Ok(())
    }
}
