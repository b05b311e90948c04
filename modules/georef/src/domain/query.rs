//! Translation of parsed parameters into backend queries and presentation
//! rules.
//!
//! Each builder takes one [`ParsedRecord`] and returns a [`RequestPlan`]: the
//! query half is what the search backend sees, the format half is what the
//! formatter sees. The two are built from the same record but never share
//! keys beyond `campos`.

use georef_params::{ParamValue, ParsedRecord};

use crate::contract::model::{FormatDescriptor, QueryDescriptor, RequestPlan, Resource};
use crate::domain::csv::csv_fields;
use crate::names as N;

// Backend query keys
pub const Q_ENTITY_ID: &str = "entity_id";
pub const Q_STREET_ID: &str = "street_id";
pub const Q_NAME: &str = "name";
pub const Q_ROAD_NAME: &str = "road_name";
pub const Q_ROAD_TYPE: &str = "road_type";
pub const Q_NUMBER: &str = "number";
pub const Q_STATE: &str = "state";
pub const Q_DEPT: &str = "department";
pub const Q_MUN: &str = "municipality";
pub const Q_EXACT: &str = "exact";
pub const Q_ORDER: &str = "order";
pub const Q_FIELDS: &str = "fields";
pub const Q_EXCLUDES: &str = "excludes";
pub const Q_LAT: &str = "lat";
pub const Q_LON: &str = "lon";

type KeyTable = &'static [(&'static str, &'static str)];

const ENTITY_KEYS: KeyTable = &[
    (N::ID, Q_ENTITY_ID),
    (N::NAME, Q_NAME),
    (N::STATE, Q_STATE),
    (N::DEPT, Q_DEPT),
    (N::MUN, Q_MUN),
    (N::EXACT, Q_EXACT),
    (N::ORDER, Q_ORDER),
    (N::FIELDS, Q_FIELDS),
];

const STREET_KEYS: KeyTable = &[
    (N::ID, Q_STREET_ID),
    (N::NAME, Q_ROAD_NAME),
    (N::ROAD_TYPE, Q_ROAD_TYPE),
    (N::STATE, Q_STATE),
    (N::DEPT, Q_DEPT),
    (N::EXACT, Q_EXACT),
    (N::FIELDS, Q_FIELDS),
];

const ADDRESS_KEYS: KeyTable = &[
    (N::ROAD_TYPE, Q_ROAD_TYPE),
    (N::STATE, Q_STATE),
    (N::DEPT, Q_DEPT),
    (N::EXACT, Q_EXACT),
];

const PLACE_KEYS: KeyTable = &[(N::LAT, Q_LAT), (N::LON, Q_LON), (N::FIELDS, Q_FIELDS)];

/// Presentation-only parameters; never sent to the backend.
const FORMAT_ONLY: &[&str] = &[N::FLATTEN, N::FORMAT];

/// Copy `record` into a query, renaming keys found in `translations`.
/// Keys without a translation keep their name; keys in `ignore` are dropped.
pub fn translate_keys(record: &ParsedRecord, translations: KeyTable, ignore: &[&str]) -> QueryDescriptor {
    record
        .iter()
        .filter(|(key, _)| !ignore.contains(&key.as_str()))
        .map(|(key, value)| {
            let name = translations
                .iter()
                .find(|(from, _)| *from == key.as_str())
                .map_or(key.as_str(), |(_, to)| *to);
            (name.to_string(), value.clone())
        })
        .collect()
}

/// Presentation rules for one record of `resource`. The CSV column table is
/// only attached when CSV output was requested.
pub fn build_format(resource: Resource, record: &ParsedRecord) -> FormatDescriptor {
    let format = record
        .get(N::FORMAT)
        .and_then(ParamValue::as_str)
        .map(str::to_string);
    let csv = match format.as_deref() {
        Some(N::FORMAT_CSV) => csv_fields(resource),
        _ => None,
    };

    FormatDescriptor {
        flatten: record.get(N::FLATTEN).and_then(ParamValue::as_bool),
        fields: record
            .get(N::FIELDS)
            .and_then(ParamValue::as_list)
            .map(<[String]>::to_vec),
        format,
        csv_fields: csv,
    }
}

/// States, departments, municipalities and localities.
pub fn build_entity_query_format(resource: Resource, record: &ParsedRecord) -> RequestPlan {
    RequestPlan {
        query: translate_keys(record, ENTITY_KEYS, FORMAT_ONLY),
        format: build_format(resource, record),
    }
}

pub fn build_street_query_format(record: &ParsedRecord) -> RequestPlan {
    let mut query = translate_keys(record, STREET_KEYS, FORMAT_ONLY);
    query.insert(Q_EXCLUDES, vec![N::GEOM.to_string()]);

    RequestPlan {
        query,
        format: build_format(Resource::Streets, record),
    }
}

/// Address queries search the streets index by road name, and ask for the
/// geometry and the door-number boundaries needed to place the number along
/// the street. The door number is passed on with its digits as written.
pub fn build_address_query_format(record: &ParsedRecord) -> RequestPlan {
    let mut ignore = vec![N::ADDRESS, N::FIELDS];
    ignore.extend_from_slice(FORMAT_ONLY);
    let mut query = translate_keys(record, ADDRESS_KEYS, &ignore);

    if let Some(address) = record.get(N::ADDRESS).and_then(ParamValue::as_address) {
        query.insert(Q_ROAD_NAME, address.street.clone());
        query.insert(Q_NUMBER, address.number.clone());
    }

    let mut fields: Vec<String> = record
        .get(N::FIELDS)
        .and_then(ParamValue::as_list)
        .map(<[String]>::to_vec)
        .unwrap_or_default();
    for extra in [N::GEOM, N::START_R, N::END_L] {
        if !fields.iter().any(|f| f == extra) {
            fields.push(extra.to_string());
        }
    }
    query.insert(Q_FIELDS, fields);
    query.insert(Q_EXCLUDES, vec![N::START_L.to_string(), N::END_R.to_string()]);

    RequestPlan {
        query,
        format: build_format(Resource::Addresses, record),
    }
}

/// Place queries keep only the point and the requested fields; the
/// department and municipality lookups are derived from them later.
pub fn build_place_query_format(record: &ParsedRecord) -> RequestPlan {
    RequestPlan {
        query: translate_keys(record, PLACE_KEYS, FORMAT_ONLY),
        format: build_format(Resource::Places, record),
    }
}

/// Builder dispatch by resource.
pub fn plan(resource: Resource, record: &ParsedRecord) -> RequestPlan {
    match resource {
        Resource::States
        | Resource::Departments
        | Resource::Municipalities
        | Resource::Localities => build_entity_query_format(resource, record),
        Resource::Streets => build_street_query_format(record),
        Resource::Addresses => build_address_query_format(record),
        Resource::Places => build_place_query_format(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ResourceCatalog;
    use crate::domain::place::{department_queries, municipality_queries};
    use georef_params::{ParamKind, RawParams, StreetAddress};

    fn record(pairs: &[(&str, ParamValue)]) -> ParsedRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn list(items: &[&str]) -> ParamValue {
        ParamValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_translate_keys_renames_and_drops() {
        let parsed = record(&[
            (N::ID, "02".into()),
            (N::MAX, 10i64.into()),
            (N::FLATTEN, true.into()),
        ]);

        let query = translate_keys(&parsed, ENTITY_KEYS, FORMAT_ONLY);

        assert_eq!(query.get(Q_ENTITY_ID), Some(&ParamValue::from("02")));
        assert_eq!(query.get(N::MAX), Some(&ParamValue::Int(10)));
        assert!(!query.contains_key(N::FLATTEN));
        assert!(!query.contains_key(N::ID));
    }

    #[test]
    fn test_entity_plan() {
        let parsed = record(&[
            (N::NAME, "Córdoba".into()),
            (N::STATE, "14".into()),
            (N::FIELDS, list(&[N::ID, N::NAME, N::SOURCE])),
            (N::FORMAT, N::FORMAT_JSON.into()),
            (N::FLATTEN, false.into()),
        ]);

        let plan = plan(Resource::Departments, &parsed);

        assert_eq!(plan.query.get(Q_NAME), Some(&ParamValue::from("Córdoba")));
        assert_eq!(plan.query.get(Q_STATE), Some(&ParamValue::from("14")));
        assert!(!plan.query.contains_key(N::FORMAT));
        assert_eq!(plan.format.format.as_deref(), Some(N::FORMAT_JSON));
        assert_eq!(plan.format.flatten, Some(false));
        assert!(plan.format.csv_fields.is_none());
    }

    #[test]
    fn test_csv_columns_only_for_csv() {
        let parsed = record(&[(N::FORMAT, N::FORMAT_CSV.into())]);
        let plan = plan(Resource::Localities, &parsed);
        assert_eq!(
            plan.format.csv_fields.map(|c| c[0].column),
            Some("localidad_id")
        );
    }

    #[test]
    fn test_street_plan_excludes_geometry() {
        let parsed = record(&[(N::NAME, "Corrientes".into()), (N::ROAD_TYPE, "AV".into())]);
        let plan = build_street_query_format(&parsed);

        assert_eq!(plan.query.get(Q_ROAD_NAME), Some(&ParamValue::from("Corrientes")));
        assert_eq!(plan.query.get(Q_ROAD_TYPE), Some(&ParamValue::from("AV")));
        assert_eq!(plan.query.get(Q_EXCLUDES), Some(&list(&[N::GEOM])));
    }

    #[test]
    fn test_address_plan_requests_interpolation_fields() {
        let parsed = record(&[
            (
                N::ADDRESS,
                StreetAddress {
                    street: "Santa Fe".into(),
                    number: "01234".into(),
                }
                .into(),
            ),
            (N::FIELDS, list(&[N::ID, N::NAME, N::DOOR_NUM, N::SOURCE])),
            (N::MAX, 10i64.into()),
        ]);

        let plan = build_address_query_format(&parsed);

        assert_eq!(plan.query.get(Q_ROAD_NAME), Some(&ParamValue::from("Santa Fe")));
        assert_eq!(plan.query.get(Q_NUMBER), Some(&ParamValue::from("01234")));
        assert!(!plan.query.contains_key(N::ADDRESS));

        let fields = plan.query.fields().unwrap();
        for required in [N::GEOM, N::START_R, N::END_L, N::DOOR_NUM] {
            assert!(fields.iter().any(|f| f == required), "missing {}", required);
        }
        assert_eq!(
            plan.query.get(Q_EXCLUDES),
            Some(&list(&[N::START_L, N::END_R]))
        );
        // The formatter only sees what the caller asked for.
        assert_eq!(plan.format.fields.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_place_plan_keeps_point() {
        let parsed = record(&[
            (N::LAT, (-34.6).into()),
            (N::LON, (-58.4).into()),
            (N::FIELDS, list(&[N::STATE_ID])),
            (N::FLATTEN, true.into()),
        ]);

        let plan = build_place_query_format(&parsed);

        assert_eq!(plan.query.len(), 3);
        assert_eq!(plan.query.get(Q_LAT), Some(&ParamValue::Float(-34.6)));
        assert_eq!(plan.format.flatten, Some(true));
    }

    /// Smallest valid querystring for each resource.
    fn minimal_request(resource: Resource) -> RawParams {
        match resource {
            Resource::Addresses => RawParams::from_querystring("direccion=Santa+Fe+1000"),
            Resource::Places => RawParams::from_querystring("lat=-31.4&lon=-64.2"),
            _ => RawParams::new(),
        }
    }

    fn selectable_fields(catalog: &ResourceCatalog, resource: Resource) -> (Vec<String>, Vec<String>) {
        match catalog.params(resource).querystring_params()[N::FIELDS].kind() {
            ParamKind::StrSet {
                constants,
                optionals,
            } => (
                constants.iter().cloned().collect(),
                optionals.iter().cloned().collect(),
            ),
            other => panic!("campos of {} is not a field set: {:?}", resource, other),
        }
    }

    fn assert_format_fields_are_queried(resource: Resource, plan: &RequestPlan) {
        let shown = plan.format.fields.as_deref().unwrap_or_default();
        let queried = plan.query.fields().unwrap_or_default();
        assert!(!shown.is_empty(), "{}: no presented fields", resource);
        for field in shown {
            assert!(
                queried.contains(field),
                "{}: presented field {} is not queried",
                resource,
                field
            );
        }
    }

    #[test]
    fn test_presented_fields_are_always_queried() {
        let catalog = ResourceCatalog::build().unwrap();

        for resource in Resource::ALL {
            let params = catalog.params(resource);
            let (constants, optionals) = selectable_fields(&catalog, resource);

            let default = params.parse_get(&minimal_request(resource)).unwrap();
            assert_format_fields_are_queried(resource, &plan(resource, &default));

            let mut explicit_sets = vec![constants.clone()];
            if let Some(optional) = optionals.first() {
                let mut with_optional = constants.clone();
                with_optional.push(optional.clone());
                explicit_sets.push(with_optional);
            }
            for fields in explicit_sets {
                let mut request = minimal_request(resource);
                request.push(N::FIELDS, fields.join(","));
                let record = params.parse_get(&request).unwrap();
                let planned = plan(resource, &record);

                assert_format_fields_are_queried(resource, &planned);
                let shown = planned.format.fields.unwrap_or_default();
                assert_eq!(shown.len(), fields.len(), "{}: {:?}", resource, fields);
            }
        }
    }

    #[test]
    fn test_place_lookups_keep_minimal_fields() {
        let catalog = ResourceCatalog::build().unwrap();
        let record = catalog
            .params(Resource::Places)
            .parse_get(&minimal_request(Resource::Places))
            .unwrap();
        let queries = vec![plan(Resource::Places, &record).query];

        let dept = &department_queries(&queries)[0];
        assert_eq!(
            dept.fields().map(<[String]>::to_vec),
            Some(vec![N::ID.to_string(), N::NAME.to_string(), N::STATE.to_string()])
        );
        let muni = &municipality_queries(&queries)[0];
        assert_eq!(
            muni.fields().map(<[String]>::to_vec),
            Some(vec![N::ID.to_string(), N::NAME.to_string()])
        );
        assert_eq!(dept.get(Q_LAT), Some(&ParamValue::Float(-31.4)));
        assert_eq!(muni.get(Q_LON), Some(&ParamValue::Float(-64.2)));
    }
}
