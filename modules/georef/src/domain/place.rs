//! Point lookups: one department and one municipality lookup per point,
//! merged into a single place record.

use georef_params::ParamValue;
use serde_json::{json, Value};

use crate::contract::model::{QueryDescriptor, Record, Resource};
use crate::domain::query::{Q_FIELDS, Q_LAT, Q_LON};
use crate::names as N;

fn point_query(query: &QueryDescriptor, fields: &[&str]) -> QueryDescriptor {
    let mut derived = QueryDescriptor::new();
    for key in [Q_LAT, Q_LON] {
        if let Some(value) = query.get(key) {
            derived.insert(key, value.clone());
        }
    }
    derived.insert(
        Q_FIELDS,
        fields.iter().map(|f| f.to_string()).collect::<Vec<_>>(),
    );
    derived
}

/// Department lookups carry the state so no third lookup is needed.
pub fn department_queries(queries: &[QueryDescriptor]) -> Vec<QueryDescriptor> {
    queries
        .iter()
        .map(|q| point_query(q, &[N::ID, N::NAME, N::STATE]))
        .collect()
}

pub fn municipality_queries(queries: &[QueryDescriptor]) -> Vec<QueryDescriptor> {
    queries
        .iter()
        .map(|q| point_query(q, &[N::ID, N::NAME]))
        .collect()
}

fn empty_entity() -> Value {
    let mut entity = Record::new();
    entity.insert(N::ID.to_string(), Value::Null);
    entity.insert(N::NAME.to_string(), Value::Null);
    Value::Object(entity)
}

fn coordinate(query: &QueryDescriptor, key: &str) -> Value {
    query
        .get(key)
        .and_then(ParamValue::as_float)
        .map_or(Value::Null, |v| json!(v))
}

/// Merge the department and municipality found at a point.
///
/// Without a department the point is outside every indexed polygon: all
/// three entities are empty and `fuente` is null.
pub fn build_place_result(
    query: &QueryDescriptor,
    department: Option<Record>,
    municipality: Option<Record>,
) -> Record {
    let (state, department, municipality, source) = match department {
        None => (empty_entity(), empty_entity(), empty_entity(), Value::Null),
        Some(mut department) => {
            let state = department.remove(N::STATE).unwrap_or_else(empty_entity);
            let municipality = municipality.map_or_else(empty_entity, Value::Object);
            (
                state,
                Value::Object(department),
                municipality,
                Value::from(Resource::Departments.source()),
            )
        }
    };

    let mut place = Record::new();
    place.insert(N::STATE.to_string(), state);
    place.insert(N::DEPT.to_string(), department);
    place.insert(N::MUN.to_string(), municipality);
    place.insert(N::LAT.to_string(), coordinate(query, Q_LAT));
    place.insert(N::LON.to_string(), coordinate(query, Q_LON));
    place.insert(N::SOURCE.to_string(), source);
    place
}
