//! Turns street matches of an address query into address results.

use futures::stream::{self, StreamExt, TryStreamExt};
use georef_params::ParamValue;
use serde_json::{json, Value};
use tracing::warn;

use crate::contract::model::{Location, QueryDescriptor, Record, Resource};
use crate::domain::error::DomainError;
use crate::domain::ports::locator::{DoorRange, StreetLocator};
use crate::domain::query::Q_NUMBER;
use crate::names as N;

/// Interpolation input detached from a street record.
struct PendingLocation {
    index: usize,
    geometry: Value,
    range: DoorRange,
    door: f64,
}

fn door_range(door_nums: &Value) -> Option<DoorRange> {
    Some(DoorRange {
        start_right: door_nums.get(N::START)?.get(N::RIGHT)?.as_f64()?,
        end_left: door_nums.get(N::END)?.get(N::LEFT)?.as_f64()?,
    })
}

/// Append the door number to the street part of a full name
/// ("Santa Fe, Rosario, Santa Fe" → "Santa Fe 1234, Rosario, Santa Fe").
fn full_name_with_number(full_name: &str, number: &str) -> String {
    match full_name.split_once(',') {
        Some((street, rest)) => format!("{} {},{}", street, number, rest),
        None => format!("{} {}", full_name, number),
    }
}

fn location_value(location: Option<Location>) -> Value {
    match location {
        Some(Location { lat, lon }) => json!({ "lat": lat, "lon": lon }),
        None => json!({ "lat": null, "lon": null }),
    }
}

/// Rewrite the street matches of one address query in place.
///
/// The raw door-number ranges and the geometry are always removed. When a
/// location was requested it is resolved through `locator`, at most
/// `concurrency` lookups at a time. Matches missing a geometry or a
/// boundary get a null location, as do all matches when the door number is
/// too large to interpolate.
pub async fn build_addresses_result(
    locator: &dyn StreetLocator,
    matches: &mut [Record],
    query: &QueryDescriptor,
    concurrency: usize,
) -> Result<(), DomainError> {
    let fields = query.fields().unwrap_or_default();
    let wants = |name: &str| fields.iter().any(|f| f == name);
    let number = query
        .get(Q_NUMBER)
        .and_then(ParamValue::as_str)
        .ok_or_else(|| DomainError::internal("address query without a door number"))?;
    let door_value = number.parse::<f64>().ok().filter(|n| n.is_finite());
    let wants_location = wants(N::LOCATION_LAT) || wants(N::LOCATION_LON);
    let source = Resource::Addresses.source();

    let mut pending = Vec::new();
    for (index, street) in matches.iter_mut().enumerate() {
        if wants(N::FULL_NAME) {
            if let Some(full_name) = street.get(N::FULL_NAME).and_then(Value::as_str) {
                let renamed = full_name_with_number(full_name, number);
                street.insert(N::FULL_NAME.to_string(), Value::from(renamed));
            }
        }

        let range = street.remove(N::DOOR_NUM).as_ref().and_then(door_range);
        let geometry = street.remove(N::GEOM);

        if wants(N::DOOR_NUM) {
            street.insert(N::DOOR_NUM.to_string(), Value::from(number));
        }

        if wants_location {
            match (geometry, range, door_value) {
                (Some(geometry), Some(range), Some(door)) => pending.push(PendingLocation {
                    index,
                    geometry,
                    range,
                    door,
                }),
                _ => {
                    warn!(street = index, number, "Street match cannot be located at this door number");
                    street.insert(N::LOCATION.to_string(), location_value(None));
                }
            }
        }

        street.insert(N::SOURCE.to_string(), Value::from(source));
    }

    let located: Vec<(usize, Location)> = stream::iter(pending)
        .map(|p| async move {
            locator
                .street_number_location(&p.geometry, p.door, p.range)
                .await
                .map(|location| (p.index, location))
        })
        .buffer_unordered(concurrency.max(1))
        .try_collect()
        .await?;

    for (index, location) in located {
        if let Some(street) = matches.get_mut(index) {
            street.insert(N::LOCATION.to_string(), location_value(Some(location)));
        }
    }

    Ok(())
}
