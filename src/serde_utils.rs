use std::io::Write;
use std::path::Path;

use eyre::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// EIP-55 checksummed addresses, ethers serializes them lowercase
pub mod checksum {
    use ethers::types::Address;
    use ethers::utils::to_checksum;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        address: &Address,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_checksum(address, None))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        s.parse().map_err(serde::de::Error::custom)
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2026-10-18T12:00:00.000Z`
pub mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer
            .serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        DateTime::parse_from_rfc3339(&s)
            .map(|timestamp| timestamp.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

pub async fn read_deserialize<T>(path: impl AsRef<Path>) -> eyre::Result<T>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Reading from {}", path.display()))?;

    let value = serde_yaml::from_str(&content).with_context(|| {
        format!("Parsing {} content was {content}", path.display())
    })?;

    Ok(value)
}

/// Writes `value` as 2-space indented JSON, replacing whatever was at `path`.
///
/// The content lands in a temporary file next to `path` first and is then
/// renamed over it, so the destination is either the old file or the complete
/// new one.
pub async fn write_json_pretty<T>(
    path: impl AsRef<Path>,
    value: &T,
) -> eyre::Result<()>
where
    T: Serialize,
{
    let path = path.as_ref().to_owned();

    let content = serde_json::to_string_pretty(value)
        .with_context(|| format!("Serializing {}", path.display()))?;

    tokio::task::spawn_blocking(move || -> eyre::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Creating temp file in {}", dir.display()))?;

        file.write_all(content.as_bytes())
            .with_context(|| format!("Writing to {}", path.display()))?;

        // Temp files are created owner-only, the record keeps the mode of
        // the file it replaces
        let permissions = match std::fs::metadata(&path) {
            Ok(metadata) => metadata.permissions(),
            Err(_) => default_permissions(file.as_file())?,
        };
        file.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Setting permissions of {}", path.display()))?;

        file.persist(&path)
            .with_context(|| format!("Writing to {}", path.display()))?;

        Ok(())
    })
    .await?
}

#[cfg(unix)]
fn default_permissions(file: &std::fs::File) -> eyre::Result<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = file.metadata()?.permissions();
    permissions.set_mode(0o644);

    Ok(permissions)
}

#[cfg(not(unix))]
fn default_permissions(file: &std::fs::File) -> eyre::Result<std::fs::Permissions> {
    Ok(file.metadata()?.permissions())
}
