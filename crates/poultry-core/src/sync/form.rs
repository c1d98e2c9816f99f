use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{Field, ProductionRecord, RecordPatch};

/// Text slots of the record form, one per attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    production_number: String,
    number_of_hens: String,
    eggs_laid: String,
    quantity_of_meat_sold: String,
    feed_consumption: String,
    water_consumption: String,
    mortality_rate: String,
    vaccination_date: String,
}

impl FormFields {
    /// Copy every attribute of a record into text slots
    pub fn from_record(record: &ProductionRecord) -> Self {
        let mut form = Self::default();
        for field in Field::ALL {
            form.set(field, record.fields.display(field));
        }
        form
    }

    pub fn get(&self, field: Field) -> &str {
        self.slot(field)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Coerce the slots into a payload
    ///
    /// Every slot is sent, so an empty slot clears the field on update. Uses
    /// the same coercion rules as the service.
    pub fn to_patch(&self) -> Result<RecordPatch> {
        let object: Map<String, Value> = Field::ALL
            .iter()
            .map(|&field| {
                (
                    field.wire_name().to_string(),
                    Value::String(self.slot(field).to_string()),
                )
            })
            .collect();
        RecordPatch::from_json(&Value::Object(object))
    }

    fn slot(&self, field: Field) -> &String {
        match field {
            Field::ProductionNumber => &self.production_number,
            Field::NumberOfHens => &self.number_of_hens,
            Field::EggsLaid => &self.eggs_laid,
            Field::QuantityOfMeatSold => &self.quantity_of_meat_sold,
            Field::FeedConsumption => &self.feed_consumption,
            Field::WaterConsumption => &self.water_consumption,
            Field::MortalityRate => &self.mortality_rate,
            Field::VaccinationDate => &self.vaccination_date,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::ProductionNumber => &mut self.production_number,
            Field::NumberOfHens => &mut self.number_of_hens,
            Field::EggsLaid => &mut self.eggs_laid,
            Field::QuantityOfMeatSold => &mut self.quantity_of_meat_sold,
            Field::FeedConsumption => &mut self.feed_consumption,
            Field::WaterConsumption => &mut self.water_consumption,
            Field::MortalityRate => &mut self.mortality_rate,
            Field::VaccinationDate => &mut self.vaccination_date,
        }
    }
}
