use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Archive entries that carry the package manifest, in lookup order.
pub const MANIFEST_ENTRIES: &[&str] = &["+COMPACT_MANIFEST", "+MANIFEST"];

/// The subset of a FreeBSD package manifest this crate reads.
///
/// Packages store the manifest as a JSON object. Unknown keys are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub maintainer: Option<String>,
    #[serde(default)]
    pub www: Option<String>,
    #[serde(default)]
    pub abi: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub flatsize: Option<u64>,
    #[serde(default)]
    pub licenselogic: Option<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub deps: BTreeMap<String, Dependency>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Dependency {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_manifest() {
        let json = r#"{
            "name": "curl",
            "origin": "ftp/curl",
            "version": "8.5.0_1",
            "comment": "Command line tool for transferring data",
            "maintainer": "sunpoet@FreeBSD.org",
            "www": "https://curl.se/",
            "abi": "FreeBSD:14:amd64",
            "arch": "freebsd:14:x86:64",
            "prefix": "/usr/local",
            "flatsize": 4673394,
            "licenselogic": "single",
            "licenses": ["MIT"],
            "desc": "curl is a command line tool",
            "categories": ["ftp", "net", "www"],
            "deps": {"libnghttp2": {"origin": "www/libnghttp2", "version": "1.58.0"}},
            "annotations": {"FreeBSD_version": "1400097"}
        }"#;

        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.name, "curl");
        assert_eq!(manifest.version, "8.5.0_1");
        assert_eq!(manifest.origin.as_deref(), Some("ftp/curl"));
        assert_eq!(manifest.flatsize, Some(4673394));
        assert_eq!(manifest.licenses, ["MIT"]);
        assert_eq!(
            manifest.deps["libnghttp2"].version.as_deref(),
            Some("1.58.0")
        );
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"name": "foo", "version": "1.0"}"#).unwrap();
        assert_eq!(manifest.name, "foo");
        assert!(manifest.deps.is_empty());
        assert_eq!(manifest.comment, None);
    }

    #[test]
    fn test_manifest_requires_name_and_version() {
        assert!(serde_json::from_str::<Manifest>(r#"{"name": "foo"}"#).is_err());
        assert!(serde_json::from_str::<Manifest>(r#"{"version": "1.0"}"#).is_err());
    }
}
