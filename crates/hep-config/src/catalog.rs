//! Particle catalog records (particles.json).
//!
//! Raw JSON is checked field by field before it becomes a typed record, so
//! a wrong-typed field reports its path (`particles[2].pdg`) and the
//! offending value instead of a generic deserialization failure. The legacy
//! keys `particle_class`, `br` and `daughters` are accepted as aliases.

use crate::validate::{validate_catalog, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// Reference to a particle by PDG code or by catalog name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParticleRef {
    Pdg(i32),
    Name(String),
}

impl fmt::Display for ParticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleRef::Pdg(code) => write!(f, "{}", code),
            ParticleRef::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<i32> for ParticleRef {
    fn from(code: i32) -> Self {
        ParticleRef::Pdg(code)
    }
}

impl From<&str> for ParticleRef {
    fn from(name: &str) -> Self {
        ParticleRef::Name(name.to_string())
    }
}

/// One decay channel of an unstable particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayModeRecord {
    #[serde(alias = "br")]
    pub branching_ratio: f64,
    #[serde(alias = "daughters")]
    pub products: Vec<ParticleRef>,
}

/// Static properties of one particle species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    pub name: String,
    pub pdg: i32,
    #[serde(alias = "particle_class")]
    pub category: String,
    /// Mass in GeV.
    pub mass: f64,
    /// Charge in units of e.
    pub charge: f64,
    pub stable: bool,
    #[serde(default)]
    pub decay_modes: Vec<DecayModeRecord>,
}

/// Read and validate a catalog file.
pub fn load_catalog(path: &Path) -> ValidationResult<Vec<ParticleRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_catalog(&content)
}

/// Parse and validate catalog JSON.
///
/// Accepts a top-level array of records or an object with a `particles` array.
pub fn parse_catalog(json: &str) -> ValidationResult<Vec<ParticleRecord>> {
    let root: Value = serde_json::from_str(json)
        .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))?;

    let items = match &root {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("particles") {
            Some(Value::Array(items)) => items,
            Some(other) => return Err(wrong_type("particles", "array", other)),
            None => return Err(ValidationError::MissingField("particles".to_string())),
        },
        other => return Err(wrong_type("catalog", "array of particle records", other)),
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(i, item)| record_from_value(&format!("particles[{}]", i), item))
        .collect::<ValidationResult<Vec<_>>>()?;

    validate_catalog(&records)?;
    Ok(records)
}

fn record_from_value(path: &str, value: &Value) -> ValidationResult<ParticleRecord> {
    let obj = value
        .as_object()
        .ok_or_else(|| wrong_type(path, "object", value))?;

    let decay_modes = match lookup(obj, &["decay_modes"]) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(modes)) => modes
            .iter()
            .enumerate()
            .map(|(i, m)| decay_mode_from_value(&format!("{}.decay_modes[{}]", path, i), m))
            .collect::<ValidationResult<Vec<_>>>()?,
        Some(other) => return Err(wrong_type(&format!("{}.decay_modes", path), "array", other)),
    };

    Ok(ParticleRecord {
        name: require_str(obj, path, &["name"])?,
        pdg: require_pdg(obj, path, &["pdg"])?,
        category: require_str(obj, path, &["category", "particle_class"])?,
        mass: require_f64(obj, path, &["mass"])?,
        charge: require_f64(obj, path, &["charge"])?,
        stable: require_bool(obj, path, &["stable"])?,
        decay_modes,
    })
}

fn decay_mode_from_value(path: &str, value: &Value) -> ValidationResult<DecayModeRecord> {
    let obj = value
        .as_object()
        .ok_or_else(|| wrong_type(path, "object", value))?;

    let branching_ratio = require_f64(obj, path, &["branching_ratio", "br"])?;

    let products_field = format!("{}.products", path);
    let products = match lookup(obj, &["products", "daughters"]) {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| product_from_value(&format!("{}[{}]", products_field, i), item))
            .collect::<ValidationResult<Vec<_>>>()?,
        Some(other) => return Err(wrong_type(&products_field, "array", other)),
        None => return Err(ValidationError::MissingField(products_field)),
    };

    Ok(DecayModeRecord {
        branching_ratio,
        products,
    })
}

fn product_from_value(path: &str, value: &Value) -> ValidationResult<ParticleRef> {
    match value {
        Value::String(name) => Ok(ParticleRef::Name(name.clone())),
        Value::Number(_) => pdg_from_value(path, value).map(ParticleRef::Pdg),
        other => Err(wrong_type(path, "PDG code or particle name", other)),
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

fn field_path(path: &str, keys: &[&str]) -> String {
    format!("{}.{}", path, keys.first().copied().unwrap_or_default())
}

fn require<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    keys: &[&str],
) -> ValidationResult<&'a Value> {
    lookup(obj, keys).ok_or_else(|| ValidationError::MissingField(field_path(path, keys)))
}

fn require_str(obj: &Map<String, Value>, path: &str, keys: &[&str]) -> ValidationResult<String> {
    let value = require(obj, path, keys)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_type(&field_path(path, keys), "string", value))
}

fn require_f64(obj: &Map<String, Value>, path: &str, keys: &[&str]) -> ValidationResult<f64> {
    let value = require(obj, path, keys)?;
    value
        .as_f64()
        .ok_or_else(|| wrong_type(&field_path(path, keys), "number", value))
}

fn require_bool(obj: &Map<String, Value>, path: &str, keys: &[&str]) -> ValidationResult<bool> {
    let value = require(obj, path, keys)?;
    value
        .as_bool()
        .ok_or_else(|| wrong_type(&field_path(path, keys), "boolean", value))
}

fn require_pdg(obj: &Map<String, Value>, path: &str, keys: &[&str]) -> ValidationResult<i32> {
    let value = require(obj, path, keys)?;
    pdg_from_value(&field_path(path, keys), value)
}

fn pdg_from_value(field: &str, value: &Value) -> ValidationResult<i32> {
    let code = value
        .as_i64()
        .ok_or_else(|| wrong_type(field, "integer", value))?;
    i32::try_from(code).map_err(|_| ValidationError::invalid(field, code, "PDG code out of range"))
}

fn wrong_type(field: &str, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected,
        found: found.to_string(),
    }
}

fn particle(
    name: &str,
    pdg: i32,
    category: &str,
    mass: f64,
    charge: f64,
    decay_modes: Vec<DecayModeRecord>,
) -> ParticleRecord {
    ParticleRecord {
        name: name.to_string(),
        pdg,
        category: category.to_string(),
        mass,
        charge,
        stable: decay_modes.is_empty(),
        decay_modes,
    }
}

fn decay(branching_ratio: f64, products: &[ParticleRef]) -> DecayModeRecord {
    DecayModeRecord {
        branching_ratio,
        products: products.to_vec(),
    }
}

/// Built-in catalog: charged leptons, the photon and the Z boson.
///
/// Masses in GeV, branching ratios rounded from PDG averages.
pub fn default_catalog() -> Vec<ParticleRecord> {
    use ParticleRef::{Name, Pdg};
    let name = |s: &str| Name(s.to_string());

    vec![
        particle("electron", 11, "lepton", 0.000_510_999, -1.0, vec![]),
        particle("positron", -11, "lepton", 0.000_510_999, 1.0, vec![]),
        particle(
            "muon",
            13,
            "lepton",
            0.105_658,
            -1.0,
            vec![decay(1.0, &[Pdg(11), name("nu_e~"), name("nu_mu")])],
        ),
        particle(
            "antimuon",
            -13,
            "lepton",
            0.105_658,
            1.0,
            vec![decay(1.0, &[Pdg(-11), name("nu_e"), name("nu_mu~")])],
        ),
        particle(
            "tau",
            15,
            "lepton",
            1.776_86,
            -1.0,
            vec![
                decay(0.1739, &[Pdg(13), name("nu_mu~"), name("nu_tau")]),
                decay(0.1782, &[Pdg(11), name("nu_e~"), name("nu_tau")]),
                decay(0.6479, &[name("hadrons"), name("nu_tau")]),
            ],
        ),
        particle(
            "antitau",
            -15,
            "lepton",
            1.776_86,
            1.0,
            vec![
                decay(0.1739, &[Pdg(-13), name("nu_mu"), name("nu_tau~")]),
                decay(0.1782, &[Pdg(-11), name("nu_e"), name("nu_tau~")]),
                decay(0.6479, &[name("hadrons"), name("nu_tau~")]),
            ],
        ),
        particle("photon", 22, "gauge boson", 0.0, 0.0, vec![]),
        particle(
            "Z",
            23,
            "gauge boson",
            91.1876,
            0.0,
            vec![
                decay(0.033_63, &[Pdg(11), Pdg(-11)]),
                decay(0.033_66, &[Pdg(13), Pdg(-13)]),
                decay(0.033_70, &[Pdg(15), Pdg(-15)]),
                decay(0.200_00, &[name("invisible")]),
                decay(0.699_01, &[name("hadrons")]),
            ],
        ),
    ]
}
