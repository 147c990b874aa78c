//! Builtin function signatures.
//!
//! Argument-count bounds come from a static table keyed by function name.
//! Names missing from the table resolve to `None`: the arity is unknown, not
//! forbidden, and no row is emitted for them.

use std::fmt;
use std::sync::LazyLock;

use bcrev_registry_spec::RevisionId;
use rustc_hash::FxHashMap as HashMap;

/// Serialization builtins whose optional second argument appeared at a known
/// revision boundary without a rename.
pub const WIDENED_SERIALIZATION_FUNCTIONS: [&str; 2] = ["var2bytes", "bytes2var"];

/// Revisions on which [`WIDENED_SERIALIZATION_FUNCTIONS`] accept (1, 2) arguments.
pub const WIDENED_SERIALIZATION_REVISIONS: [u32; 10] = [
	0xf3f05dc, 0x506df14, 0xa7aad78, 0x5565f55, 0x6694c11, 0xa60f242, 0xc00427a, 0x620ec47,
	0x7f7d97f, 0x514a3fb,
];

/// Inclusive argument-count bounds; `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arity {
	pub min: u32,
	pub max: Option<u32>,
}

impl Arity {
	pub const fn exact(n: u32) -> Self {
		Self {
			min: n,
			max: Some(n),
		}
	}

	pub const fn range(min: u32, max: u32) -> Self {
		Self {
			min,
			max: Some(max),
		}
	}

	pub const fn at_least(min: u32) -> Self {
		Self { min, max: None }
	}

	pub fn is_unbounded(&self) -> bool {
		self.max.is_none()
	}

	pub fn accepts(&self, count: u32) -> bool {
		count >= self.min && self.max.is_none_or(|max| count <= max)
	}
}

impl fmt::Display for Arity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.max {
			Some(max) => write!(f, "({}, {max})", self.min),
			None => write!(f, "({}, ..)", self.min),
		}
	}
}

const SIGNATURES: &[(&str, Arity)] = &[
	("sin", Arity::exact(1)),
	("cos", Arity::exact(1)),
	("tan", Arity::exact(1)),
	("sinh", Arity::exact(1)),
	("cosh", Arity::exact(1)),
	("tanh", Arity::exact(1)),
	("asin", Arity::exact(1)),
	("acos", Arity::exact(1)),
	("atan", Arity::exact(1)),
	("atan2", Arity::exact(2)),
	("sqrt", Arity::exact(1)),
	("fmod", Arity::exact(2)),
	("fposmod", Arity::exact(2)),
	("posmod", Arity::exact(2)),
	("floor", Arity::exact(1)),
	("ceil", Arity::exact(1)),
	("round", Arity::exact(1)),
	("abs", Arity::exact(1)),
	("sign", Arity::exact(1)),
	("pow", Arity::exact(2)),
	("log", Arity::exact(1)),
	("exp", Arity::exact(1)),
	("is_nan", Arity::exact(1)),
	("is_inf", Arity::exact(1)),
	("is_equal_approx", Arity::exact(2)),
	("is_zero_approx", Arity::exact(1)),
	("ease", Arity::exact(2)),
	("decimals", Arity::exact(1)),
	("step_decimals", Arity::exact(1)),
	("stepify", Arity::exact(2)),
	("lerp", Arity::exact(3)),
	("lerp_angle", Arity::exact(3)),
	("inverse_lerp", Arity::exact(3)),
	("range_lerp", Arity::exact(5)),
	("smoothstep", Arity::exact(3)),
	("move_toward", Arity::exact(3)),
	("dectime", Arity::exact(3)),
	("randomize", Arity::exact(0)),
	("randi", Arity::exact(0)),
	("randf", Arity::exact(0)),
	("rand_range", Arity::exact(2)),
	("seed", Arity::exact(1)),
	("rand_seed", Arity::exact(1)),
	("deg2rad", Arity::exact(1)),
	("rad2deg", Arity::exact(1)),
	("linear2db", Arity::exact(1)),
	("db2linear", Arity::exact(1)),
	("polar2cartesian", Arity::exact(2)),
	("cartesian2polar", Arity::exact(2)),
	("wrapi", Arity::exact(3)),
	("wrapf", Arity::exact(3)),
	("max", Arity::exact(2)),
	("min", Arity::exact(2)),
	("clamp", Arity::exact(3)),
	("nearest_po2", Arity::exact(1)),
	("weakref", Arity::exact(1)),
	("funcref", Arity::exact(2)),
	("convert", Arity::exact(2)),
	("typeof", Arity::exact(1)),
	("type_exists", Arity::exact(1)),
	("char", Arity::exact(1)),
	("ord", Arity::exact(1)),
	("str", Arity::at_least(1)),
	("print", Arity::at_least(0)),
	("printt", Arity::at_least(0)),
	("prints", Arity::at_least(0)),
	("printerr", Arity::at_least(0)),
	("printraw", Arity::at_least(0)),
	("print_debug", Arity::at_least(0)),
	("push_error", Arity::exact(1)),
	("push_warning", Arity::exact(1)),
	("var2str", Arity::exact(1)),
	("str2var", Arity::exact(1)),
	("var2bytes", Arity::exact(1)),
	("bytes2var", Arity::exact(1)),
	("range", Arity::range(1, 3)),
	("load", Arity::exact(1)),
	("inst2dict", Arity::exact(1)),
	("dict2inst", Arity::exact(1)),
	("validate_json", Arity::exact(1)),
	("parse_json", Arity::exact(1)),
	("to_json", Arity::exact(1)),
	("hash", Arity::exact(1)),
	("Color8", Arity::exact(3)),
	("ColorN", Arity::range(1, 2)),
	("print_stack", Arity::exact(0)),
	("get_stack", Arity::exact(0)),
	("instance_from_id", Arity::exact(1)),
	("len", Arity::exact(1)),
	("is_instance_valid", Arity::exact(1)),
	("deep_equal", Arity::exact(2)),
	("get_inst", Arity::exact(1)),
];

static TABLE: LazyLock<HashMap<&'static str, Arity>> =
	LazyLock::new(|| SIGNATURES.iter().copied().collect());

/// Looks up the revision-independent bound for `name`.
pub fn lookup(name: &str) -> Option<Arity> {
	TABLE.get(name).copied()
}

/// Whether `name` is one of the serialization builtins gated by revision.
pub fn is_version_gated(name: &str) -> bool {
	WIDENED_SERIALIZATION_FUNCTIONS.contains(&name)
}

/// Resolves the argument-count bound of `name` at revision `rev`.
pub fn resolve(name: &str, rev: &RevisionId) -> Option<Arity> {
	if is_version_gated(name) {
		return Some(if WIDENED_SERIALIZATION_REVISIONS.contains(&rev.number()) {
			Arity::range(1, 2)
		} else {
			Arity::exact(1)
		});
	}
	lookup(name)
}

/// Every name in the static table, in table order.
pub fn known_functions() -> impl Iterator<Item = &'static str> {
	SIGNATURES.iter().map(|(name, _)| *name)
}
