//! Names the API uses for resources, fields and parameters.

// Resources
pub const ADDRESSES: &str = "direcciones";
pub const STREETS: &str = "calles";
pub const LOCALITIES: &str = "localidades";
pub const DEPARTMENTS: &str = "departamentos";
pub const MUNICIPALITIES: &str = "municipios";
pub const STATES: &str = "provincias";
pub const PLACES: &str = "ubicaciones";
pub const PLACE: &str = "ubicacion";

// Fields
pub const ID: &str = "id";
pub const DOOR_NUM: &str = "altura";
pub const ROAD_TYPE: &str = "tipo";
pub const NAME: &str = "nombre";
pub const FULL_NAME: &str = "nomenclatura";
pub const STATE: &str = "provincia";
pub const DEPT: &str = "departamento";
pub const MUN: &str = "municipio";
pub const GEOM: &str = "geometria";
pub const LAT: &str = "lat";
pub const LON: &str = "lon";
pub const C_LAT: &str = "centroide.lat";
pub const C_LON: &str = "centroide.lon";
pub const END_R: &str = "altura.fin.derecha";
pub const END_L: &str = "altura.fin.izquierda";
pub const START_R: &str = "altura.inicio.derecha";
pub const START_L: &str = "altura.inicio.izquierda";
pub const START: &str = "inicio";
pub const END: &str = "fin";
pub const RIGHT: &str = "derecha";
pub const LEFT: &str = "izquierda";
pub const SOURCE: &str = "fuente";
pub const LOCALITY_TYPE: &str = "tipo";
pub const LOCATION: &str = "ubicacion";
pub const LOCATION_LAT: &str = "ubicacion.lat";
pub const LOCATION_LON: &str = "ubicacion.lon";
pub const STATE_ID: &str = "provincia.id";
pub const STATE_NAME: &str = "provincia.nombre";
pub const DEPT_ID: &str = "departamento.id";
pub const DEPT_NAME: &str = "departamento.nombre";
pub const MUN_ID: &str = "municipio.id";
pub const MUN_NAME: &str = "municipio.nombre";

// Parameters
pub const ADDRESS: &str = "direccion";
pub const ORDER: &str = "orden";
pub const FIELDS: &str = "campos";
pub const FLATTEN: &str = "aplanar";
pub const MAX: &str = "max";
pub const FORMAT: &str = "formato";
pub const EXACT: &str = "exacto";

// Output formats
pub const FORMAT_JSON: &str = "json";
pub const FORMAT_CSV: &str = "csv";
pub const FORMAT_GEOJSON: &str = "geojson";

// Data sources
pub const SOURCE_INDEC: &str = "INDEC";
pub const SOURCE_BAHRA: &str = "BAHRA";
pub const SOURCE_IGN: &str = "IGN";
