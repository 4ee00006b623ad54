use crate::error::Error;
use crate::scanner::{FetchErrorPolicy, ScanPolicy};
use etron::{Auth, ProductId};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tixly::{Credentials, OrderNumber};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const CONFIG_PATH_VAR: &str = "BRIDGE_CONFIG";

/// Settings for one bridge process, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub prefix: String,
    pub order_start: OrderNumber,
    /// Target product slots, in `Etron_ID_1..=11` order
    pub slot_ids: Vec<ProductId>,
    pub tixly_address: String,
    pub tixly_credentials: Credentials,
    pub etron_address: String,
    pub etron_auth: Auth,
    pub log_file: Option<PathBuf>,
    pub scan: ScanPolicy,
    pub rescan_backoff: i64,
    pub cycle_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        ConfigFile::default().into()
    }
}

impl Config {
    /// Path from `BRIDGE_CONFIG`, or `config.json` in the working directory.
    pub fn path() -> PathBuf {
        env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        Ok(serde_json::from_str::<ConfigFile>(text)?.into())
    }
}

/// On-disk layout. Key names match the existing deployment files.
#[derive(Deserialize, Debug)]
#[serde(default)]
struct ConfigFile {
    #[serde(rename = "Prefix")]
    prefix: String,
    #[serde(rename = "TixlyId_OrderStart")]
    order_start: i64,
    #[serde(rename = "Etron_ID_1")]
    etron_id_1: ProductId,
    #[serde(rename = "Etron_ID_2")]
    etron_id_2: ProductId,
    #[serde(rename = "Etron_ID_3")]
    etron_id_3: ProductId,
    #[serde(rename = "Etron_ID_4")]
    etron_id_4: ProductId,
    #[serde(rename = "Etron_ID_5")]
    etron_id_5: ProductId,
    #[serde(rename = "Etron_ID_6")]
    etron_id_6: ProductId,
    #[serde(rename = "Etron_ID_7")]
    etron_id_7: ProductId,
    #[serde(rename = "Etron_ID_8")]
    etron_id_8: ProductId,
    #[serde(rename = "Etron_ID_9")]
    etron_id_9: ProductId,
    #[serde(rename = "Etron_ID_10")]
    etron_id_10: ProductId,
    #[serde(rename = "Etron_ID_11")]
    etron_id_11: ProductId,
    #[serde(rename = "EtronAuthorization")]
    etron_authorization: Option<String>,
    #[serde(rename = "EtronCookie")]
    etron_cookie: Option<String>,
    // Misspelled keys are what the deployed config files contain
    #[serde(rename = "TixlyCliendID")]
    tixly_client_id: Option<String>,
    #[serde(rename = "TixlyCliendSecretID")]
    tixly_client_secret: Option<String>,
    #[serde(rename = "EtronAdress")]
    etron_address: Option<String>,
    #[serde(rename = "TixlyAddress")]
    tixly_address: Option<String>,
    #[serde(rename = "LogFile")]
    log_file: Option<PathBuf>,
    #[serde(rename = "MissThreshold")]
    miss_threshold: u32,
    #[serde(rename = "CountFetchErrorsAsMisses")]
    count_fetch_errors_as_misses: bool,
    #[serde(rename = "RescanBackoff")]
    rescan_backoff: i64,
    #[serde(rename = "CycleDelaySecs")]
    cycle_delay_secs: f64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            prefix: "Tixly_ID_Test:".to_string(),
            order_start: 20000,
            etron_id_1: 145,
            etron_id_2: 146,
            etron_id_3: 147,
            etron_id_4: 148,
            etron_id_5: 149,
            etron_id_6: 150,
            etron_id_7: 151,
            etron_id_8: 152,
            etron_id_9: 153,
            etron_id_10: 154,
            etron_id_11: 155,
            etron_authorization: None,
            etron_cookie: None,
            tixly_client_id: None,
            tixly_client_secret: None,
            etron_address: None,
            tixly_address: None,
            log_file: None,
            miss_threshold: ScanPolicy::default().miss_threshold,
            count_fetch_errors_as_misses: false,
            rescan_backoff: 5,
            cycle_delay_secs: 1.0,
        }
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        let on_fetch_error = if file.count_fetch_errors_as_misses {
            FetchErrorPolicy::CountAsMiss
        } else {
            FetchErrorPolicy::Skip
        };

        Self {
            prefix: file.prefix,
            order_start: OrderNumber(file.order_start),
            slot_ids: vec![
                file.etron_id_1,
                file.etron_id_2,
                file.etron_id_3,
                file.etron_id_4,
                file.etron_id_5,
                file.etron_id_6,
                file.etron_id_7,
                file.etron_id_8,
                file.etron_id_9,
                file.etron_id_10,
                file.etron_id_11,
            ],
            tixly_address: file
                .tixly_address
                .unwrap_or_else(|| tixly::DEFAULT_BASE_URL.to_string()),
            tixly_credentials: Credentials {
                client_id: file.tixly_client_id.unwrap_or_default(),
                client_secret: file.tixly_client_secret.unwrap_or_default(),
            },
            etron_address: file.etron_address.unwrap_or_default(),
            etron_auth: Auth {
                authorization: file.etron_authorization.unwrap_or_default(),
                cookie: file.etron_cookie.unwrap_or_default(),
            },
            log_file: file.log_file.filter(|path| !path.as_os_str().is_empty()),
            scan: ScanPolicy {
                miss_threshold: file.miss_threshold.max(1),
                on_fetch_error,
            },
            rescan_backoff: file.rescan_backoff,
            cycle_delay: Duration::try_from_secs_f64(file.cycle_delay_secs)
                .unwrap_or(Duration::from_secs(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.prefix, "Tixly_ID_Test:");
        assert_eq!(config.order_start, OrderNumber(20000));
        assert_eq!(config.slot_ids, (145..=155).collect::<Vec<_>>());
        assert_eq!(config.tixly_address, tixly::DEFAULT_BASE_URL);
        assert_eq!(config.scan.miss_threshold, 20);
        assert_eq!(config.scan.on_fetch_error, FetchErrorPolicy::Skip);
        assert_eq!(config.rescan_backoff, 5);
        assert_eq!(config.cycle_delay, Duration::from_secs(1));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn deployed_file_layout() {
        let config = Config::from_json(
            r#"{
                "Prefix": "Order",
                "TixlyId_OrderStart": 31000,
                "Etron_ID_1": 1, "Etron_ID_2": 2, "Etron_ID_3": 3, "Etron_ID_4": 4,
                "Etron_ID_5": 5, "Etron_ID_6": 6, "Etron_ID_7": 7, "Etron_ID_8": 8,
                "Etron_ID_9": 9, "Etron_ID_10": 10, "Etron_ID_11": 11,
                "EtronAuthorization": "Basic xyz",
                "EtronCookie": "session_id=abc",
                "TixlyCliendID": "client",
                "TixlyCliendSecretID": "secret",
                "EtronAdress": "https://etron.example.com",
                "LogFile": "bridge.log"
            }"#,
        )
        .unwrap();

        assert_eq!(config.prefix, "Order");
        assert_eq!(config.order_start, OrderNumber(31000));
        assert_eq!(config.slot_ids, (1..=11).collect::<Vec<_>>());
        assert_eq!(config.etron_auth.authorization, "Basic xyz");
        assert_eq!(config.etron_auth.cookie, "session_id=abc");
        assert_eq!(config.tixly_credentials.client_id, "client");
        assert_eq!(config.tixly_credentials.client_secret, "secret");
        assert_eq!(config.etron_address, "https://etron.example.com");
        assert_eq!(config.log_file, Some(PathBuf::from("bridge.log")));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = Config::from_json(
            r#"{"Etron_ID_3": 900, "MissThreshold": 3, "CountFetchErrorsAsMisses": true}"#,
        )
        .unwrap();

        assert_eq!(config.prefix, "Tixly_ID_Test:");
        assert_eq!(config.slot_ids[2], 900);
        assert_eq!(config.slot_ids[3], 148);
        assert_eq!(config.scan.miss_threshold, 3);
        assert_eq!(config.scan.on_fetch_error, FetchErrorPolicy::CountAsMiss);
    }

    #[test]
    fn null_strings_are_treated_as_unset() {
        let config =
            Config::from_json(r#"{"EtronCookie": null, "TixlyAddress": null, "LogFile": ""}"#)
                .unwrap();
        assert_eq!(config.etron_auth.cookie, "");
        assert_eq!(config.tixly_address, tixly::DEFAULT_BASE_URL);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn zero_threshold_is_clamped() {
        let config = Config::from_json(r#"{"MissThreshold": 0}"#).unwrap();
        assert_eq!(config.scan.miss_threshold, 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::ConfigRead { .. })));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let result = Config::from_file(file.path());
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Prefix": "Disk", "RescanBackoff": 10}}"#).unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.prefix, "Disk");
        assert_eq!(config.rescan_backoff, 10);
    }
}
