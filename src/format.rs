//! Output formatting for resolved groups
//!
//! Maps each resolved group DN to a RADIUS attribute-value pair string,
//! either with the full DN as the value or with just the CN component
//! extracted from it, depending on configuration.

use crate::config::Config;
use crate::error::{RadgroupsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a resolved group DN is rendered into the attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupFormat {
    /// Only the CN component of the group DN
    Cn,
    /// The full group DN
    Dn,
}

impl Default for GroupFormat {
    fn default() -> Self {
        GroupFormat::Dn
    }
}

impl fmt::Display for GroupFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupFormat::Cn => write!(f, "cn"),
            GroupFormat::Dn => write!(f, "dn"),
        }
    }
}

impl FromStr for GroupFormat {
    type Err = RadgroupsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "cn" => Ok(GroupFormat::Cn),
            "dn" => Ok(GroupFormat::Dn),
            other => Err(RadgroupsError::Config(format!(
                "Invalid group format: {}. Must be one of: cn, dn",
                other
            ))),
        }
    }
}

/// Format resolved group DNs into RADIUS attribute-value pair lines
///
/// Output order matches input order. Each line has the shape
/// `<attributeName> += "<valuePrefix><value>"`.
///
/// In CN mode a group DN that does not begin with a `CN=` component is a
/// fatal [`RadgroupsError::MalformedDn`]; no lines are produced in that case.
pub fn format_pairs(groups: &[String], config: &Config) -> Result<Vec<String>> {
    let attribute = &config.radius.attribute_name;
    let prefix = &config.radius.value_prefix;

    groups
        .iter()
        .map(|dn| {
            let value = match config.ldap.format {
                GroupFormat::Dn => dn.as_str(),
                GroupFormat::Cn => extract_cn(dn)?,
            };
            Ok(format!("{} += \"{}{}\"", attribute, prefix, value))
        })
        .collect()
}

/// Extract the value of the leading CN component of a DN
///
/// The DN must begin with `CN=` (compared case-insensitively); the value
/// runs up to the first comma, or to the end of the string for a
/// single-component DN.
fn extract_cn(dn: &str) -> Result<&str> {
    let rest = dn
        .get(..3)
        .filter(|prefix| prefix.eq_ignore_ascii_case("CN="))
        .map(|_| &dn[3..])
        .ok_or_else(|| RadgroupsError::MalformedDn { dn: dn.to_string() })?;

    Ok(rest.split(',').next().unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_config(format: GroupFormat) -> Config {
        let mut config = Config::default();
        config.radius.attribute_name = "Group".to_string();
        config.radius.value_prefix = "PFX:".to_string();
        config.ldap.format = format;
        config
    }

    #[test]
    fn test_dn_mode_emits_full_dn() {
        let config = test_config(GroupFormat::Dn);
        let groups = vec!["CN=Admins,OU=Groups,DC=x".to_string()];
        let pairs = format_pairs(&groups, &config).unwrap();
        assert_eq!(pairs, vec![r#"Group += "PFX:CN=Admins,OU=Groups,DC=x""#]);
    }

    #[test]
    fn test_cn_mode_extracts_common_name() {
        let config = test_config(GroupFormat::Cn);
        let groups = vec!["CN=Admins,OU=Groups,DC=x".to_string()];
        let pairs = format_pairs(&groups, &config).unwrap();
        assert_eq!(pairs, vec![r#"Group += "PFX:Admins""#]);
    }

    #[test]
    fn test_cn_mode_is_case_insensitive_on_prefix() {
        let config = test_config(GroupFormat::Cn);
        let groups = vec!["cn=Admins,OU=Groups,DC=x".to_string()];
        let pairs = format_pairs(&groups, &config).unwrap();
        assert_eq!(pairs, vec![r#"Group += "PFX:Admins""#]);
    }

    #[test]
    fn test_cn_mode_single_component_dn() {
        let config = test_config(GroupFormat::Cn);
        let groups = vec!["CN=Admins".to_string()];
        let pairs = format_pairs(&groups, &config).unwrap();
        assert_eq!(pairs, vec![r#"Group += "PFX:Admins""#]);
    }

    #[test]
    fn test_cn_mode_rejects_dn_without_cn_component() {
        let config = test_config(GroupFormat::Cn);
        let groups = vec![
            "CN=Admins,OU=Groups,DC=x".to_string(),
            "OU=Groups,DC=x".to_string(),
        ];
        let result = format_pairs(&groups, &config);
        let error = result.unwrap_err();
        let error = error.downcast_ref::<RadgroupsError>().unwrap();
        assert!(matches!(error, RadgroupsError::MalformedDn { dn } if dn == "OU=Groups,DC=x"));
    }

    #[test]
    fn test_order_matches_input_order() {
        let config = test_config(GroupFormat::Cn);
        let groups = vec![
            "CN=First,DC=x".to_string(),
            "CN=Second,DC=x".to_string(),
            "CN=Third,DC=x".to_string(),
        ];
        let pairs = format_pairs(&groups, &config).unwrap();
        assert_eq!(
            pairs,
            vec![
                r#"Group += "PFX:First""#,
                r#"Group += "PFX:Second""#,
                r#"Group += "PFX:Third""#,
            ]
        );
    }

    #[test]
    fn test_empty_input_produces_no_lines() {
        let config = test_config(GroupFormat::Dn);
        let pairs = format_pairs(&[], &config).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_group_format_from_str() {
        assert_eq!("cn".parse::<GroupFormat>().unwrap(), GroupFormat::Cn);
        assert_eq!("dn".parse::<GroupFormat>().unwrap(), GroupFormat::Dn);
        assert!("upn".parse::<GroupFormat>().is_err());
    }

    #[test]
    fn test_group_format_display_roundtrip() {
        assert_eq!(GroupFormat::Cn.to_string(), "cn");
        assert_eq!(GroupFormat::Dn.to_string(), "dn");
    }
}
