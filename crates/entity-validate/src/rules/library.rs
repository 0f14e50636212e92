//! Named library rules.
//!
//! Every rule is a string check built once from its declared arguments. The
//! registry maps the identifiers schemas use (`"isEmail"`, `"isIP"`, ...) to
//! those constructors; bad arguments are rejected when the rule is resolved,
//! not when data is validated.

use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value as JsonValue;
use url::{Host, Url};
use validator::{ValidateEmail, ValidateIp, ValidateUrl};

use crate::error::{SchemaError, SchemaResult};

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("built-in rule pattern compiles"))
        }
    };
}

static_regex!(url_regex, r"^(https?|ftp)://[^\s/$.?#].[^\s]*$");
static_regex!(
    hex_color_regex,
    r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$"
);
static_regex!(hexadecimal_regex, r"^(?i:0x|0h)?[0-9A-Fa-f]+$");
static_regex!(numeric_regex, r"^[+-]?([0-9]*[.])?[0-9]+$");
static_regex!(int_regex, r"^[-+]?(0|[1-9][0-9]*)$");
static_regex!(
    float_regex,
    r"^[-+]?[0-9]*(\.[0-9]*)?([eE][-+]?[0-9]+)?$"
);
static_regex!(
    uuid_regex,
    r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$"
);
static_regex!(
    mac_regex,
    r"^([0-9A-Fa-f]{2}(:[0-9A-Fa-f]{2}){5}|[0-9A-Fa-f]{2}(-[0-9A-Fa-f]{2}){5})$"
);
static_regex!(
    base64_regex,
    r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$"
);

/// A named check over the string form of a value.
pub trait LibraryRule: Debug + Send + Sync {
    /// Whether the value passes.
    fn check(&self, value: &str) -> bool;

    /// The identifier the rule is registered under.
    fn rule_name(&self) -> &'static str;
}

/// Identifiers of every rule in the registry.
pub const RULE_NAMES: &[&str] = &[
    "isEmail",
    "isURL",
    "isIP",
    "isFQDN",
    "isHexColor",
    "isHexadecimal",
    "isAlpha",
    "isAlphanumeric",
    "isAscii",
    "isNumeric",
    "isInt",
    "isFloat",
    "isBoolean",
    "isLowercase",
    "isUppercase",
    "isUUID",
    "isMACAddress",
    "isBase64",
    "isJSON",
    "isISO8601",
    "isLength",
    "matches",
    "contains",
    "equals",
    "isIn",
];

/// Handle on the rule registry.
///
/// Custom predicates receive a `&RuleLibrary` so they can reuse library
/// checks on any part of the entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleLibrary {
    _priv: (),
}

static GLOBAL: RuleLibrary = RuleLibrary { _priv: () };

impl RuleLibrary {
    /// The process-wide registry.
    pub fn global() -> &'static RuleLibrary {
        &GLOBAL
    }

    /// Every registered identifier.
    pub fn names(&self) -> &'static [&'static str] {
        RULE_NAMES
    }

    /// Whether a rule is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        RULE_NAMES.contains(&name)
    }

    /// Build the rule registered under `name` with its positional arguments.
    pub fn resolve(&self, name: &str, args: &[JsonValue]) -> SchemaResult<Arc<dyn LibraryRule>> {
        let rule: Arc<dyn LibraryRule> = match name {
            "isEmail" => Arc::new(EmailRule),
            "isURL" => Arc::new(UrlRule),
            "isIP" => Arc::new(IpRule::from_args(args)?),
            "isFQDN" => Arc::new(FqdnRule),
            "isHexColor" => Arc::new(HexColorRule),
            "isHexadecimal" => Arc::new(HexadecimalRule),
            "isAlpha" => Arc::new(CharClassRule::alpha()),
            "isAlphanumeric" => Arc::new(CharClassRule::alphanumeric()),
            "isAscii" => Arc::new(CharClassRule::ascii()),
            "isNumeric" => Arc::new(NumericRule),
            "isInt" => Arc::new(IntRule),
            "isFloat" => Arc::new(FloatRule),
            "isBoolean" => Arc::new(BooleanRule),
            "isLowercase" => Arc::new(CaseRule::Lower),
            "isUppercase" => Arc::new(CaseRule::Upper),
            "isUUID" => Arc::new(UuidRule::from_args(args)?),
            "isMACAddress" => Arc::new(MacAddressRule),
            "isBase64" => Arc::new(Base64Rule),
            "isJSON" => Arc::new(JsonRule),
            "isISO8601" => Arc::new(Iso8601Rule),
            "isLength" => Arc::new(LengthRule::from_args(args)?),
            "matches" => Arc::new(RegexRule::from_args(args)?),
            "contains" => Arc::new(ContainsRule {
                seed: string_arg("contains", args, 0)?,
            }),
            "equals" => Arc::new(EqualsRule {
                comparison: string_arg("equals", args, 0)?,
            }),
            "isIn" => Arc::new(InRule::from_args(args)?),
            _ => return Err(SchemaError::UnknownRule(name.to_string())),
        };
        Ok(rule)
    }

    /// Resolve and run a rule in one go.
    pub fn check(&self, name: &str, value: &str, args: &[JsonValue]) -> SchemaResult<bool> {
        Ok(self.resolve(name, args)?.check(value))
    }

    /// `isEmail` without going through the registry.
    pub fn is_email(&self, value: &str) -> bool {
        EmailRule.check(value)
    }

    /// `isURL` without going through the registry.
    pub fn is_url(&self, value: &str) -> bool {
        UrlRule.check(value)
    }

    /// `version` is 4, 6, or `None` for either.
    pub fn is_ip(&self, value: &str, version: Option<u8>) -> bool {
        IpRule { version }.check(value)
    }

    /// `isHexColor` without going through the registry.
    pub fn is_hex_color(&self, value: &str) -> bool {
        HexColorRule.check(value)
    }
}

fn string_arg(rule: &str, args: &[JsonValue], index: usize) -> SchemaResult<String> {
    match args.get(index) {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        Some(JsonValue::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(SchemaError::invalid_args(
            rule,
            format!("argument {index} must be a scalar, got {other}"),
        )),
        None => Err(SchemaError::invalid_args(
            rule,
            format!("missing argument {index}"),
        )),
    }
}

fn usize_arg(rule: &str, value: Option<&JsonValue>) -> SchemaResult<Option<usize>> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| SchemaError::invalid_args(rule, format!("{n} is not a length"))),
        Some(other) => Err(SchemaError::invalid_args(
            rule,
            format!("{other} is not a length"),
        )),
    }
}

/// Parse an optional version argument given as a number or a numeric string.
fn version_arg(rule: &str, args: &[JsonValue], allowed: &[u8]) -> SchemaResult<Option<u8>> {
    let version = match args.first() {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(JsonValue::String(s)) if s.eq_ignore_ascii_case("all") => return Ok(None),
        Some(JsonValue::Number(n)) => n.as_u64(),
        Some(JsonValue::String(s)) => s.parse::<u64>().ok(),
        Some(_) => None,
    };
    version
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| allowed.contains(v))
        .map(Some)
        .ok_or_else(|| {
            SchemaError::invalid_args(rule, format!("version must be one of {allowed:?}"))
        })
}

/// Fully qualified domain name with an alphabetic (or punycode) TLD.
fn is_fqdn(value: &str) -> bool {
    let domain = value.strip_suffix('.').unwrap_or(value);
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let valid_labels = labels.iter().all(|label| {
        !label.is_empty()
            && label.chars().count() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });

    let tld = labels[labels.len() - 1];
    let valid_tld = (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
        || (tld.len() > 4 && tld.to_ascii_lowercase().starts_with("xn--"));

    valid_labels && valid_tld
}

/// Email address whose domain is a fully qualified name.
#[derive(Debug, Clone, Copy)]
pub struct EmailRule;

impl LibraryRule for EmailRule {
    fn check(&self, value: &str) -> bool {
        value.validate_email()
            && value
                .rsplit_once('@')
                .map_or(false, |(_, domain)| is_fqdn(domain))
    }

    fn rule_name(&self) -> &'static str {
        "isEmail"
    }
}

/// http, https or ftp URL whose host is a fully qualified name or an IP
/// literal.
#[derive(Debug, Clone, Copy)]
pub struct UrlRule;

impl LibraryRule for UrlRule {
    fn check(&self, value: &str) -> bool {
        if !url_regex().is_match(value) || !value.validate_url() {
            return false;
        }
        match Url::parse(value).ok().as_ref().and_then(Url::host) {
            Some(Host::Domain(domain)) => is_fqdn(domain),
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
            None => false,
        }
    }

    fn rule_name(&self) -> &'static str {
        "isURL"
    }
}

/// IP address, optionally restricted to one version.
#[derive(Debug, Clone, Copy)]
pub struct IpRule {
    pub version: Option<u8>,
}

impl IpRule {
    fn from_args(args: &[JsonValue]) -> SchemaResult<Self> {
        Ok(Self {
            version: version_arg("isIP", args, &[4, 6])?,
        })
    }
}

impl LibraryRule for IpRule {
    fn check(&self, value: &str) -> bool {
        match self.version {
            Some(4) => value.validate_ipv4(),
            Some(6) => value.validate_ipv6(),
            _ => value.validate_ip(),
        }
    }

    fn rule_name(&self) -> &'static str {
        "isIP"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FqdnRule;

impl LibraryRule for FqdnRule {
    fn check(&self, value: &str) -> bool {
        is_fqdn(value)
    }

    fn rule_name(&self) -> &'static str {
        "isFQDN"
    }
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`, with or without the `#`.
#[derive(Debug, Clone, Copy)]
pub struct HexColorRule;

impl LibraryRule for HexColorRule {
    fn check(&self, value: &str) -> bool {
        hex_color_regex().is_match(value)
    }

    fn rule_name(&self) -> &'static str {
        "isHexColor"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HexadecimalRule;

impl LibraryRule for HexadecimalRule {
    fn check(&self, value: &str) -> bool {
        hexadecimal_regex().is_match(value)
    }

    fn rule_name(&self) -> &'static str {
        "isHexadecimal"
    }
}

/// Non-empty string whose characters all belong to one ASCII class.
#[derive(Debug, Clone, Copy)]
pub struct CharClassRule {
    name: &'static str,
    accepts: fn(&char) -> bool,
}

impl CharClassRule {
    fn alpha() -> Self {
        Self {
            name: "isAlpha",
            accepts: char::is_ascii_alphabetic,
        }
    }

    fn alphanumeric() -> Self {
        Self {
            name: "isAlphanumeric",
            accepts: char::is_ascii_alphanumeric,
        }
    }

    fn ascii() -> Self {
        Self {
            name: "isAscii",
            accepts: char::is_ascii,
        }
    }
}

impl LibraryRule for CharClassRule {
    fn check(&self, value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| (self.accepts)(&c))
    }

    fn rule_name(&self) -> &'static str {
        self.name
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NumericRule;

impl LibraryRule for NumericRule {
    fn check(&self, value: &str) -> bool {
        numeric_regex().is_match(value)
    }

    fn rule_name(&self) -> &'static str {
        "isNumeric"
    }
}

/// Integer string without leading zeros.
#[derive(Debug, Clone, Copy)]
pub struct IntRule;

impl LibraryRule for IntRule {
    fn check(&self, value: &str) -> bool {
        int_regex().is_match(value)
    }

    fn rule_name(&self) -> &'static str {
        "isInt"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FloatRule;

impl LibraryRule for FloatRule {
    fn check(&self, value: &str) -> bool {
        let mantissa = value.split(['e', 'E']).next().unwrap_or_default();
        float_regex().is_match(value) && mantissa.chars().any(|c| c.is_ascii_digit())
    }

    fn rule_name(&self) -> &'static str {
        "isFloat"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BooleanRule;

impl LibraryRule for BooleanRule {
    fn check(&self, value: &str) -> bool {
        matches!(value, "true" | "false" | "1" | "0")
    }

    fn rule_name(&self) -> &'static str {
        "isBoolean"
    }
}

#[derive(Debug, Clone, Copy)]
pub enum CaseRule {
    Lower,
    Upper,
}

impl LibraryRule for CaseRule {
    fn check(&self, value: &str) -> bool {
        match self {
            CaseRule::Lower => value == value.to_lowercase(),
            CaseRule::Upper => value == value.to_uppercase(),
        }
    }

    fn rule_name(&self) -> &'static str {
        match self {
            CaseRule::Lower => "isLowercase",
            CaseRule::Upper => "isUppercase",
        }
    }
}

/// UUID, optionally of a given version (1 to 5).
#[derive(Debug, Clone, Copy)]
pub struct UuidRule {
    pub version: Option<u8>,
}

impl UuidRule {
    fn from_args(args: &[JsonValue]) -> SchemaResult<Self> {
        Ok(Self {
            version: version_arg("isUUID", args, &[1, 2, 3, 4, 5])?,
        })
    }
}

impl LibraryRule for UuidRule {
    fn check(&self, value: &str) -> bool {
        if !uuid_regex().is_match(value) {
            return false;
        }
        let Some(version) = self.version else {
            return true;
        };

        // Shape already checked, so both positions are ASCII hex digits.
        let bytes = value.as_bytes();
        let version_ok = bytes[14] == b'0' + version;
        let variant_ok = match version {
            4 | 5 => matches!(bytes[19], b'8' | b'9' | b'a' | b'b' | b'A' | b'B'),
            _ => true,
        };
        version_ok && variant_ok
    }

    fn rule_name(&self) -> &'static str {
        "isUUID"
    }
}

/// Colon- or hyphen-separated MAC address.
#[derive(Debug, Clone, Copy)]
pub struct MacAddressRule;

impl LibraryRule for MacAddressRule {
    fn check(&self, value: &str) -> bool {
        mac_regex().is_match(value)
    }

    fn rule_name(&self) -> &'static str {
        "isMACAddress"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Base64Rule;

impl LibraryRule for Base64Rule {
    fn check(&self, value: &str) -> bool {
        !value.is_empty() && value.len() % 4 == 0 && base64_regex().is_match(value)
    }

    fn rule_name(&self) -> &'static str {
        "isBase64"
    }
}

/// JSON text whose top level is an object or an array.
#[derive(Debug, Clone, Copy)]
pub struct JsonRule;

impl LibraryRule for JsonRule {
    fn check(&self, value: &str) -> bool {
        serde_json::from_str::<JsonValue>(value)
            .map_or(false, |parsed| parsed.is_object() || parsed.is_array())
    }

    fn rule_name(&self) -> &'static str {
        "isJSON"
    }
}

/// RFC 3339 timestamp, local date-time or calendar date.
#[derive(Debug, Clone, Copy)]
pub struct Iso8601Rule;

impl LibraryRule for Iso8601Rule {
    fn check(&self, value: &str) -> bool {
        DateTime::parse_from_rfc3339(value).is_ok()
            || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
            || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
    }

    fn rule_name(&self) -> &'static str {
        "isISO8601"
    }
}

/// Character count within bounds.
///
/// Arguments: `[min]`, `[min, max]` or `[{ "min": .., "max": .. }]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthRule {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
}

impl LengthRule {
    fn from_args(args: &[JsonValue]) -> SchemaResult<Self> {
        let (min, max) = match args.first() {
            Some(JsonValue::Object(bounds)) => (
                usize_arg("isLength", bounds.get("min"))?,
                usize_arg("isLength", bounds.get("max"))?,
            ),
            first => (usize_arg("isLength", first)?, usize_arg("isLength", args.get(1))?),
        };

        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(SchemaError::invalid_args(
                    "isLength",
                    format!("min {min} is greater than max {max}"),
                ));
            }
        }
        Ok(Self { min, max })
    }
}

impl LibraryRule for LengthRule {
    fn check(&self, value: &str) -> bool {
        let len = value.chars().count();
        self.min.map_or(true, |min| len >= min) && self.max.map_or(true, |max| len <= max)
    }

    fn rule_name(&self) -> &'static str {
        "isLength"
    }
}

/// Pattern match. Arguments: `[pattern]` or `[pattern, flags]` where flags
/// are any of `i`, `m`, `s`, `x`.
#[derive(Debug, Clone)]
pub struct RegexRule {
    /// The regex pattern
    pub pattern: String,
    compiled: Regex,
}

impl RegexRule {
    fn from_args(args: &[JsonValue]) -> SchemaResult<Self> {
        let pattern = string_arg("matches", args, 0)?;
        let flags = match args.get(1) {
            None | Some(JsonValue::Null) => String::new(),
            Some(_) => string_arg("matches", args, 1)?,
        };

        if let Some(flag) = flags.chars().find(|c| !"imsx".contains(*c)) {
            return Err(SchemaError::invalid_args(
                "matches",
                format!("unsupported flag '{flag}'"),
            ));
        }

        let source = if flags.is_empty() {
            pattern.clone()
        } else {
            format!("(?{flags}){pattern}")
        };
        let compiled = Regex::new(&source).map_err(|e| {
            SchemaError::invalid_args("matches", format!("invalid pattern '{pattern}': {e}"))
        })?;

        Ok(Self { pattern, compiled })
    }
}

impl LibraryRule for RegexRule {
    fn check(&self, value: &str) -> bool {
        self.compiled.is_match(value)
    }

    fn rule_name(&self) -> &'static str {
        "matches"
    }
}

#[derive(Debug, Clone)]
pub struct ContainsRule {
    pub seed: String,
}

impl LibraryRule for ContainsRule {
    fn check(&self, value: &str) -> bool {
        value.contains(&self.seed)
    }

    fn rule_name(&self) -> &'static str {
        "contains"
    }
}

#[derive(Debug, Clone)]
pub struct EqualsRule {
    pub comparison: String,
}

impl LibraryRule for EqualsRule {
    fn check(&self, value: &str) -> bool {
        value == self.comparison
    }

    fn rule_name(&self) -> &'static str {
        "equals"
    }
}

/// Membership in a list of options. Argument: `[[option, ...]]`.
#[derive(Debug, Clone)]
pub struct InRule {
    pub options: Vec<String>,
}

impl InRule {
    fn from_args(args: &[JsonValue]) -> SchemaResult<Self> {
        let Some(JsonValue::Array(items)) = args.first() else {
            return Err(SchemaError::invalid_args("isIn", "expected an array of options"));
        };
        let options = (0..items.len())
            .map(|i| string_arg("isIn", items, i))
            .collect::<SchemaResult<Vec<_>>>()?;
        Ok(Self { options })
    }
}

impl LibraryRule for InRule {
    fn check(&self, value: &str) -> bool {
        self.options.iter().any(|option| option == value)
    }

    fn rule_name(&self) -> &'static str {
        "isIn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(name: &str, args: &[JsonValue], value: &str) -> bool {
        RuleLibrary::global().check(name, value, args).unwrap()
    }

    #[test]
    fn email_requires_fqdn_domain() {
        assert!(check("isEmail", &[], "john@snow.com"));
        assert!(check("isEmail", &[], "first.last+tag@mail.example.org"));
        assert!(!check("isEmail", &[], "john@snow"));
        assert!(!check("isEmail", &[], "not-an-email"));
        assert!(!check("isEmail", &[], "john@snow.c0m"));
    }

    #[test]
    fn url_requires_known_scheme() {
        assert!(check("isURL", &[], "http://www.google.com"));
        assert!(check("isURL", &[], "https://example.com/path?q=1"));
        assert!(check("isURL", &[], "ftp://files.example.com"));
        assert!(!check("isURL", &[], "example"));
        assert!(!check("isURL", &[], "123"));
        assert!(!check("isURL", &[], "mailto:john@example.com"));
    }

    #[test]
    fn url_host_needs_tld_or_ip() {
        assert!(check("isURL", &[], "http://127.0.0.1:8080/health"));
        assert!(check("isURL", &[], "http://[::1]/"));
        assert!(check("isURL", &[], "https://user:pw@sub.example.org:8443/x"));
        assert!(!check("isURL", &[], "http://localhost"));
        assert!(!check("isURL", &[], "http://ab"));
        assert!(!check("isURL", &[], "http://example.c0m"));
        assert!(!RuleLibrary::global().is_url("http://localhost:3000"));
    }

    #[test]
    fn ip_versions() {
        assert!(check("isIP", &[], "127.0.0.1"));
        assert!(check("isIP", &[], "::1"));
        assert!(check("isIP", &[json!(4)], "192.168.0.1"));
        assert!(!check("isIP", &[json!(4)], "fe80::1"));
        assert!(check("isIP", &[json!("6")], "fe80::1"));
        assert!(!check("isIP", &[json!(6)], "10.0.0.1"));
        assert!(!check("isIP", &[], "999.1.1.1"));
    }

    #[test]
    fn ip_rejects_unknown_version() {
        let err = RuleLibrary::global().resolve("isIP", &[json!(5)]).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRuleArgs { .. }));
    }

    #[test]
    fn hex_color() {
        assert!(check("isHexColor", &[], "#ff0034"));
        assert!(check("isHexColor", &[], "CCCCCC"));
        assert!(check("isHexColor", &[], "#fff"));
        assert!(!check("isHexColor", &[], "#ff"));
        assert!(!check("isHexColor", &[], "#fffffg"));
    }

    #[test]
    fn character_classes() {
        assert!(check("isAlpha", &[], "abcDEF"));
        assert!(!check("isAlpha", &[], "abc1"));
        assert!(!check("isAlpha", &[], ""));
        assert!(check("isAlphanumeric", &[], "abc123"));
        assert!(!check("isAlphanumeric", &[], "abc-123"));
        assert!(check("isAscii", &[], "plain text"));
        assert!(!check("isAscii", &[], "café"));
    }

    #[test]
    fn numbers() {
        assert!(check("isNumeric", &[], "-12.5"));
        assert!(!check("isNumeric", &[], "12a"));
        assert!(check("isInt", &[], "-42"));
        assert!(!check("isInt", &[], "042"));
        assert!(!check("isInt", &[], "4.2"));
        assert!(check("isFloat", &[], "4.2"));
        assert!(check("isFloat", &[], "1e10"));
        assert!(check("isFloat", &[], ".5"));
        assert!(!check("isFloat", &[], "."));
        assert!(!check("isFloat", &[], "e5"));
        assert!(!check("isFloat", &[], "abc"));
        assert!(check("isHexadecimal", &[], "0xDEADbeef"));
        assert!(!check("isHexadecimal", &[], "xyz"));
    }

    #[test]
    fn booleans_and_case() {
        assert!(check("isBoolean", &[], "true"));
        assert!(check("isBoolean", &[], "0"));
        assert!(!check("isBoolean", &[], "yes"));
        assert!(check("isLowercase", &[], "abc 1"));
        assert!(!check("isLowercase", &[], "aBc"));
        assert!(check("isUppercase", &[], "ABC"));
    }

    #[test]
    fn uuid_versions() {
        let v4 = "3b241101-e2bb-4255-8caf-4136c566a962";
        assert!(check("isUUID", &[], v4));
        assert!(check("isUUID", &[json!(4)], v4));
        assert!(!check("isUUID", &[json!(3)], v4));
        assert!(check("isUUID", &[json!("all")], v4));
        assert!(!check("isUUID", &[], "3b241101e2bb42558caf4136c566a962"));
    }

    #[test]
    fn formats() {
        assert!(check("isMACAddress", &[], "01:23:45:67:89:ab"));
        assert!(check("isMACAddress", &[], "01-23-45-67-89-AB"));
        assert!(!check("isMACAddress", &[], "01:23-45:67:89:ab"));
        assert!(check("isBase64", &[], "Zm9vYmFy"));
        assert!(check("isBase64", &[], "Zm9vYg=="));
        assert!(!check("isBase64", &[], "Zm9vYg="));
        assert!(check("isJSON", &[], r#"{"a": 1}"#));
        assert!(!check("isJSON", &[], "42"));
        assert!(check("isFQDN", &[], "domain.com"));
        assert!(!check("isFQDN", &[], "localhost"));
        assert!(check("isISO8601", &[], "2015-01-01"));
        assert!(check("isISO8601", &[], "2015-01-01T10:00:00Z"));
        assert!(!check("isISO8601", &[], "01-01-2015"));
    }

    #[test]
    fn length_argument_forms() {
        assert!(check("isLength", &[json!(2), json!(4)], "abc"));
        assert!(!check("isLength", &[json!(2), json!(4)], "abcde"));
        assert!(check("isLength", &[json!({ "min": 1 })], "x"));
        assert!(!check("isLength", &[json!({ "max": 1 })], "xy"));
        assert!(check("isLength", &[json!(3)], "héé"));

        let err = RuleLibrary::global()
            .resolve("isLength", &[json!(5), json!(2)])
            .unwrap_err();
        assert!(err.to_string().contains("greater than"));
    }

    #[test]
    fn matches_with_flags() {
        assert!(check("matches", &[json!("^abc$")], "abc"));
        assert!(!check("matches", &[json!("^abc$")], "ABC"));
        assert!(check("matches", &[json!("^abc$"), json!("i")], "ABC"));

        let lib = RuleLibrary::global();
        assert!(lib.resolve("matches", &[json!("(")]).is_err());
        assert!(lib.resolve("matches", &[json!("a"), json!("g")]).is_err());
        assert!(lib.resolve("matches", &[]).is_err());
    }

    #[test]
    fn seeded_rules() {
        assert!(check("contains", &[json!("ell")], "hello"));
        assert!(!check("contains", &[json!("xyz")], "hello"));
        assert!(check("equals", &[json!(42)], "42"));
        assert!(check("isIn", &[json!(["a", "b"])], "b"));
        assert!(!check("isIn", &[json!(["a", "b"])], "c"));
        assert!(RuleLibrary::global().resolve("isIn", &[json!("a")]).is_err());
    }

    #[test]
    fn unknown_rule_is_reported() {
        let err = RuleLibrary::global().resolve("isBogus", &[]).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownRule(name) if name == "isBogus"));
    }

    #[test]
    fn every_registered_name_resolves() {
        let lib = RuleLibrary::global();
        for name in lib.names() {
            let args = match *name {
                "matches" | "contains" | "equals" => vec![json!("a")],
                "isIn" => vec![json!(["a"])],
                _ => vec![],
            };
            let rule = lib.resolve(name, &args).unwrap();
            assert_eq!(rule.rule_name(), *name);
            assert!(lib.contains(name));
        }
    }

    #[test]
    fn shortcuts_match_registry() {
        let lib = RuleLibrary::global();
        assert!(lib.is_email("a@b.io"));
        assert!(lib.is_url("https://a.io"));
        assert!(lib.is_ip("::1", Some(6)));
        assert!(lib.is_hex_color("#abc"));
    }
}
