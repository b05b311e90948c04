//! Parameter sets accepted by each resource.

use georef_params::{EndpointParameters, ParamConfigError, Parameter, MAX_SIZE_LEN};

use crate::contract::model::Resource;
use crate::names as N;

const FORMATS_ALL: [&str; 3] = [N::FORMAT_JSON, N::FORMAT_CSV, N::FORMAT_GEOJSON];
const FORMATS_TABULAR: [&str; 2] = [N::FORMAT_JSON, N::FORMAT_CSV];
const FORMATS_PLACE: [&str; 2] = [N::FORMAT_JSON, N::FORMAT_GEOJSON];

/// Immutable per-resource parameter configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    states: EndpointParameters,
    departments: EndpointParameters,
    municipalities: EndpointParameters,
    localities: EndpointParameters,
    streets: EndpointParameters,
    addresses: EndpointParameters,
    places: EndpointParameters,
}

impl ResourceCatalog {
    pub fn build() -> Result<Self, ParamConfigError> {
        Ok(Self {
            states: states()?,
            departments: departments()?,
            municipalities: municipalities()?,
            localities: localities()?,
            streets: streets()?,
            addresses: addresses()?,
            places: places()?,
        })
    }

    pub fn params(&self, resource: Resource) -> &EndpointParameters {
        match resource {
            Resource::States => &self.states,
            Resource::Departments => &self.departments,
            Resource::Municipalities => &self.municipalities,
            Resource::Localities => &self.localities,
            Resource::Streets => &self.streets,
            Resource::Addresses => &self.addresses,
            Resource::Places => &self.places,
        }
    }
}

fn max_param(default: i64) -> Parameter {
    Parameter::int(Some(1), Some(MAX_SIZE_LEN)).with_default(default)
}

fn order_param() -> Parameter {
    Parameter::string().with_choices([N::ID, N::NAME])
}

fn format_param(choices: &[&str]) -> Parameter {
    Parameter::string()
        .with_default(N::FORMAT_JSON)
        .with_choices(choices.iter().copied())
}

fn states() -> Result<EndpointParameters, ParamConfigError> {
    EndpointParameters::builder()
        .shared(N::ID, Parameter::id(2))
        .shared(N::NAME, Parameter::string())
        .shared(N::ORDER, order_param())
        .shared(N::FLATTEN, Parameter::flag())
        .shared(
            N::FIELDS,
            Parameter::str_set(&[N::ID, N::NAME, N::SOURCE], &[N::C_LAT, N::C_LON]),
        )
        .shared(N::MAX, max_param(24))
        .shared(N::EXACT, Parameter::flag())
        .querystring_only(N::FORMAT, format_param(&FORMATS_ALL))
        .build()
}

fn departments() -> Result<EndpointParameters, ParamConfigError> {
    EndpointParameters::builder()
        .shared(N::ID, Parameter::id(5))
        .shared(N::NAME, Parameter::string())
        .shared(N::STATE, Parameter::str_or_id(2))
        .shared(N::ORDER, order_param())
        .shared(N::FLATTEN, Parameter::flag())
        .shared(
            N::FIELDS,
            Parameter::str_set(
                &[N::ID, N::NAME, N::SOURCE],
                &[N::C_LAT, N::C_LON, N::STATE_ID, N::STATE_NAME],
            ),
        )
        .shared(N::MAX, max_param(10))
        .shared(N::EXACT, Parameter::flag())
        .querystring_only(N::FORMAT, format_param(&FORMATS_ALL))
        .build()
}

fn municipalities() -> Result<EndpointParameters, ParamConfigError> {
    EndpointParameters::builder()
        .shared(N::ID, Parameter::id(6))
        .shared(N::NAME, Parameter::string())
        .shared(N::STATE, Parameter::str_or_id(2))
        .shared(N::DEPT, Parameter::str_or_id(5))
        .shared(N::ORDER, order_param())
        .shared(N::FLATTEN, Parameter::flag())
        .shared(
            N::FIELDS,
            Parameter::str_set(
                &[N::ID, N::NAME, N::SOURCE],
                &[
                    N::C_LAT,
                    N::C_LON,
                    N::STATE_ID,
                    N::STATE_NAME,
                    N::DEPT_ID,
                    N::DEPT_NAME,
                ],
            ),
        )
        .shared(N::MAX, max_param(10))
        .shared(N::EXACT, Parameter::flag())
        .querystring_only(N::FORMAT, format_param(&FORMATS_ALL))
        .build()
}

fn localities() -> Result<EndpointParameters, ParamConfigError> {
    EndpointParameters::builder()
        .shared(N::ID, Parameter::id(11))
        .shared(N::NAME, Parameter::string())
        .shared(N::STATE, Parameter::str_or_id(2))
        .shared(N::DEPT, Parameter::str_or_id(5))
        .shared(N::MUN, Parameter::str_or_id(6))
        .shared(N::ORDER, order_param())
        .shared(N::FLATTEN, Parameter::flag())
        .shared(
            N::FIELDS,
            Parameter::str_set(
                &[N::ID, N::NAME, N::SOURCE],
                &[
                    N::C_LAT,
                    N::C_LON,
                    N::STATE_ID,
                    N::STATE_NAME,
                    N::DEPT_ID,
                    N::DEPT_NAME,
                    N::MUN_ID,
                    N::MUN_NAME,
                    N::LOCALITY_TYPE,
                ],
            ),
        )
        .shared(N::MAX, max_param(10))
        .shared(N::EXACT, Parameter::flag())
        .querystring_only(N::FORMAT, format_param(&FORMATS_ALL))
        .build()
}

fn streets() -> Result<EndpointParameters, ParamConfigError> {
    EndpointParameters::builder()
        .shared(N::ID, Parameter::id(13))
        .shared(N::NAME, Parameter::string())
        .shared(N::ROAD_TYPE, Parameter::string())
        .shared(N::STATE, Parameter::str_or_id(2))
        .shared(N::DEPT, Parameter::str_or_id(5))
        .shared(N::FLATTEN, Parameter::flag())
        .shared(
            N::FIELDS,
            Parameter::str_set(
                &[N::ID, N::NAME, N::SOURCE],
                &[
                    N::START_R,
                    N::START_L,
                    N::END_R,
                    N::END_L,
                    N::STATE_ID,
                    N::STATE_NAME,
                    N::DEPT_ID,
                    N::DEPT_NAME,
                    N::FULL_NAME,
                    N::ROAD_TYPE,
                ],
            ),
        )
        .shared(N::MAX, max_param(10))
        .shared(N::EXACT, Parameter::flag())
        .querystring_only(N::FORMAT, format_param(&FORMATS_TABULAR))
        .build()
}

fn addresses() -> Result<EndpointParameters, ParamConfigError> {
    EndpointParameters::builder()
        .shared(N::ADDRESS, Parameter::address())
        .shared(N::ROAD_TYPE, Parameter::string())
        .shared(N::STATE, Parameter::str_or_id(2))
        .shared(N::DEPT, Parameter::str_or_id(5))
        .shared(N::FLATTEN, Parameter::flag())
        .shared(
            N::FIELDS,
            Parameter::str_set(
                &[N::ID, N::NAME, N::DOOR_NUM, N::SOURCE],
                &[
                    N::STATE_ID,
                    N::STATE_NAME,
                    N::DEPT_ID,
                    N::DEPT_NAME,
                    N::ROAD_TYPE,
                    N::FULL_NAME,
                    N::LOCATION_LAT,
                    N::LOCATION_LON,
                ],
            ),
        )
        .shared(N::MAX, max_param(10))
        .shared(N::EXACT, Parameter::flag())
        .querystring_only(N::FORMAT, format_param(&FORMATS_TABULAR))
        .build()
}

fn places() -> Result<EndpointParameters, ParamConfigError> {
    EndpointParameters::builder()
        .shared(N::LAT, Parameter::float().required())
        .shared(N::LON, Parameter::float().required())
        .shared(N::FLATTEN, Parameter::flag())
        .shared(
            N::FIELDS,
            Parameter::str_set(
                &[N::STATE_ID, N::STATE_NAME, N::SOURCE],
                &[N::DEPT_ID, N::DEPT_NAME, N::MUN_ID, N::MUN_NAME, N::LAT, N::LON],
            ),
        )
        .querystring_only(N::FORMAT, format_param(&FORMATS_PLACE))
        .build()
}
