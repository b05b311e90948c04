//! CSV column names per resource. Nested fields are addressed by their
//! dotted path; columns are emitted in table order.

use crate::contract::model::{CsvColumn, Resource};
use crate::names as N;

const fn col(field: &'static str, column: &'static str) -> CsvColumn {
    CsvColumn { field, column }
}

pub const STATES_CSV_FIELDS: &[CsvColumn] = &[
    col(N::ID, "provincia_id"),
    col(N::NAME, "provincia_nombre"),
    col(N::C_LAT, "provincia_centroide_lat"),
    col(N::C_LON, "provincia_centroide_lon"),
    col(N::SOURCE, "provincia_fuente"),
];

pub const DEPARTMENTS_CSV_FIELDS: &[CsvColumn] = &[
    col(N::ID, "departamento_id"),
    col(N::NAME, "departamento_nombre"),
    col(N::C_LAT, "departamento_centroide_lat"),
    col(N::C_LON, "departamento_centroide_lon"),
    col(N::STATE_ID, "provincia_id"),
    col(N::STATE_NAME, "provincia_nombre"),
    col(N::SOURCE, "departamento_fuente"),
];

pub const MUNICIPALITIES_CSV_FIELDS: &[CsvColumn] = &[
    col(N::ID, "municipio_id"),
    col(N::NAME, "municipio_nombre"),
    col(N::C_LAT, "municipio_centroide_lat"),
    col(N::C_LON, "municipio_centroide_lon"),
    col(N::STATE_ID, "provincia_id"),
    col(N::STATE_NAME, "provincia_nombre"),
    col(N::DEPT_ID, "departamento_id"),
    col(N::DEPT_NAME, "departamento_nombre"),
    col(N::SOURCE, "municipio_fuente"),
];

pub const LOCALITIES_CSV_FIELDS: &[CsvColumn] = &[
    col(N::ID, "localidad_id"),
    col(N::NAME, "localidad_nombre"),
    col(N::LOCALITY_TYPE, "localidad_tipo"),
    col(N::C_LAT, "localidad_centroide_lat"),
    col(N::C_LON, "localidad_centroide_lon"),
    col(N::STATE_ID, "provincia_id"),
    col(N::STATE_NAME, "provincia_nombre"),
    col(N::DEPT_ID, "departamento_id"),
    col(N::DEPT_NAME, "departamento_nombre"),
    col(N::MUN_ID, "municipio_id"),
    col(N::MUN_NAME, "municipio_nombre"),
    col(N::SOURCE, "localidad_fuente"),
];

pub const STREETS_CSV_FIELDS: &[CsvColumn] = &[
    col(N::ID, "calle_id"),
    col(N::NAME, "calle_nombre"),
    col(N::START_R, "calle_altura_inicio_derecha"),
    col(N::START_L, "calle_altura_inicio_izquierda"),
    col(N::END_R, "calle_altura_fin_derecha"),
    col(N::END_L, "calle_altura_fin_izquierda"),
    col(N::FULL_NAME, "calle_nomenclatura"),
    col(N::ROAD_TYPE, "calle_tipo"),
    col(N::STATE_ID, "provincia_id"),
    col(N::STATE_NAME, "provincia_nombre"),
    col(N::DEPT_ID, "departamento_id"),
    col(N::DEPT_NAME, "departamento_nombre"),
    col(N::SOURCE, "calle_fuente"),
];

pub const ADDRESSES_CSV_FIELDS: &[CsvColumn] = &[
    col(N::ID, "calle_id"),
    col(N::NAME, "calle_nombre"),
    col(N::DOOR_NUM, "altura"),
    col(N::FULL_NAME, "nomenclatura"),
    col(N::ROAD_TYPE, "calle_tipo"),
    col(N::STATE_ID, "provincia_id"),
    col(N::STATE_NAME, "provincia_nombre"),
    col(N::DEPT_ID, "departamento_id"),
    col(N::DEPT_NAME, "departamento_nombre"),
    col(N::LOCATION_LAT, "ubicacion_lat"),
    col(N::LOCATION_LON, "ubicacion_lon"),
    col(N::SOURCE, "fuente"),
];

/// Column table for a resource. Places cannot be rendered as CSV.
pub fn csv_fields(resource: Resource) -> Option<&'static [CsvColumn]> {
    match resource {
        Resource::States => Some(STATES_CSV_FIELDS),
        Resource::Departments => Some(DEPARTMENTS_CSV_FIELDS),
        Resource::Municipalities => Some(MUNICIPALITIES_CSV_FIELDS),
        Resource::Localities => Some(LOCALITIES_CSV_FIELDS),
        Resource::Streets => Some(STREETS_CSV_FIELDS),
        Resource::Addresses => Some(ADDRESSES_CSV_FIELDS),
        Resource::Places => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ResourceCatalog;
    use georef_params::ParamKind;

    /// Every selectable field of a CSV-capable resource has a column.
    #[test]
    fn test_every_selectable_field_has_a_column() {
        let catalog = ResourceCatalog::build().unwrap();
        for resource in Resource::ALL {
            let Some(table) = csv_fields(resource) else {
                continue;
            };
            let fields = &catalog.params(resource).body_params()[N::FIELDS];
            let ParamKind::StrSet {
                constants,
                optionals,
            } = fields.kind()
            else {
                panic!("campos must be a string set");
            };

            for field in constants.iter().chain(optionals) {
                assert!(
                    table.iter().any(|c| c.field == field),
                    "{} has no CSV column for {}",
                    resource,
                    field
                );
            }
        }
    }
}
