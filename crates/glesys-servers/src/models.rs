//! Server data models and request parameters.

use glesys_core::impl_with_defaults;
use glesys_core::merge::WithDefaults;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Entry returned by `server/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Data center the server runs in.
    #[serde(default)]
    pub datacenter: String,
    /// Hostname.
    #[serde(default)]
    pub hostname: String,
    /// Server identifier, e.g. `kvm123456`.
    #[serde(rename = "serverid")]
    pub id: String,
    /// Virtualisation platform.
    #[serde(default)]
    pub platform: String,
}

/// System user created on platforms with user support (KVM).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub username: String,
    /// Authorised SSH public keys.
    #[serde(rename = "sshkeys", default, skip_serializing_if = "Vec::is_empty")]
    pub public_keys: Vec<String>,
    /// Password.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

/// Backup schedule for a KVM server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerBackupSchedule {
    /// Backup frequency, e.g. `daily`.
    pub frequency: String,
    /// How many images to retain.
    #[serde(rename = "numberofimagestokeep")]
    pub number_of_images_to_keep: u32,
}

/// Backup state of a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerBackupDetails {
    /// `yes` or `no`.
    #[serde(default)]
    pub enabled: String,
    /// Configured schedules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedules: Vec<ServerBackupSchedule>,
}

/// Template a KVM server was created from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTemplateDetails {
    /// Template identifier.
    pub id: String,
    /// Tags currently attached to the template.
    #[serde(rename = "currenttags", default, skip_serializing_if = "Vec::is_empty")]
    pub current_tags: Vec<String>,
    /// Template name.
    pub name: String,
}

/// IP address assigned to a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerIp {
    /// The address.
    #[serde(rename = "ipaddress")]
    pub address: String,
    /// 4 or 6.
    #[serde(default)]
    pub version: u8,
}

/// Full description of one server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerDetails {
    /// Number of CPU cores.
    #[serde(rename = "cpucores")]
    pub cpu: u32,
    /// Backup state.
    pub backup: Option<ServerBackupDetails>,
    /// Bandwidth in Mbit/s.
    pub bandwidth: u32,
    /// Data center.
    pub datacenter: String,
    /// Free-text description.
    pub description: String,
    /// Hostname.
    pub hostname: String,
    /// Server identifier.
    #[serde(rename = "serverid")]
    pub id: String,
    /// Initial template (KVM).
    #[serde(rename = "initialtemplate")]
    pub initial_template: Option<ServerTemplateDetails>,
    /// Assigned IP addresses.
    #[serde(rename = "iplist")]
    pub ip_list: Vec<ServerIp>,
    /// Running flag as reported by the API.
    #[serde(rename = "isrunning")]
    pub running: bool,
    /// Locked flag as reported by the API.
    #[serde(rename = "islocked")]
    pub locked: bool,
    /// Mounted ISO file, if any.
    #[serde(rename = "isofile", skip_serializing_if = "String::is_empty")]
    pub iso_file: String,
    /// Virtualisation platform.
    pub platform: String,
    /// Memory in MB.
    #[serde(rename = "memorysize")]
    pub memory: u32,
    /// Power state, e.g. `running` or `stopped`.
    pub state: String,
    /// Disk size in GB.
    #[serde(rename = "disksize")]
    pub storage: u32,
    /// Template name.
    #[serde(rename = "templatename")]
    pub template: String,
}

impl ServerDetails {
    /// Whether the server is locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked || self.state == "locked"
    }

    /// Whether the server is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running || self.state == "running"
    }
}

/// Web console connection details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConsoleDetails {
    /// Console host.
    pub host: String,
    /// Console port.
    pub port: u16,
    /// One-time console password.
    pub password: String,
    /// Protocol, e.g. `vnc`.
    pub protocol: String,
    /// Browser URL for the console.
    pub url: String,
}

/// Price component of a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateCost {
    /// Amount.
    pub amount: f64,
    /// Currency code.
    pub currency: String,
    /// Billing period.
    #[serde(rename = "timeperiod")]
    pub time_period: String,
}

/// A template servers can be created from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerPlatformTemplateDetails {
    /// Template identifier.
    pub id: String,
    /// Instance cost.
    #[serde(rename = "instancecost")]
    pub instance_cost: TemplateCost,
    /// License cost.
    #[serde(rename = "licensecost")]
    pub license_cost: TemplateCost,
    /// Template name.
    pub name: String,
    /// Minimum disk size in GB.
    #[serde(rename = "minimumdisksize")]
    pub min_disk_size: u32,
    /// Minimum memory size in MB.
    #[serde(rename = "minimummemorysize")]
    pub min_mem_size: u32,
    /// Operating system.
    #[serde(rename = "operatingsystem")]
    pub os: String,
    /// Platform.
    pub platform: String,
    /// Bootstrap method, e.g. `CLOUD_INIT`.
    #[serde(rename = "bootstrapmethod")]
    pub bootstrap_method: String,
}

/// Templates grouped by platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerPlatformTemplates {
    /// KVM templates.
    #[serde(rename = "KVM")]
    pub kvm: Vec<ServerPlatformTemplateDetails>,
    /// VMware templates.
    #[serde(rename = "VMware")]
    pub vmware: Vec<ServerPlatformTemplateDetails>,
}

/// Parameters for `server/create`.
///
/// Unset fields are left at their zero value; [`CreateServerParams::with_defaults`]
/// fills them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateServerParams {
    /// Backup schedules (KVM).
    #[serde(rename = "backupschedules", skip_serializing_if = "Vec::is_empty")]
    pub backup: Vec<ServerBackupSchedule>,
    /// Bandwidth in Mbit/s.
    pub bandwidth: u32,
    /// Campaign code.
    #[serde(rename = "campaigncode", skip_serializing_if = "String::is_empty")]
    pub campaign_code: String,
    /// Cloud-config template.
    #[serde(rename = "cloudconfig", skip_serializing_if = "String::is_empty")]
    pub cloud_config: String,
    /// Parameters for the cloud-config template.
    #[serde(rename = "cloudconfigparams", skip_serializing_if = "HashMap::is_empty")]
    pub cloud_config_params: HashMap<String, Value>,
    /// Number of CPU cores.
    #[serde(rename = "cpucores")]
    pub cpu: u32,
    /// Data center.
    pub datacenter: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Hostname.
    pub hostname: String,
    /// IPv4 address, or `any`.
    #[serde(rename = "ip")]
    pub ipv4: String,
    /// IPv6 address, or `any`.
    pub ipv6: String,
    /// Memory in MB.
    #[serde(rename = "memorysize")]
    pub memory: u32,
    /// Root password.
    #[serde(rename = "rootpassword", skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Virtualisation platform.
    pub platform: String,
    /// SSH public key.
    #[serde(rename = "sshkey", skip_serializing_if = "String::is_empty")]
    pub public_key: String,
    /// Disk size in GB.
    #[serde(rename = "disksize")]
    pub storage: u32,
    /// Template name.
    #[serde(rename = "templatename")]
    pub template: String,
    /// Users to create (KVM).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
}

impl_with_defaults!(CreateServerParams {
    backup,
    bandwidth,
    campaign_code,
    cloud_config,
    cloud_config_params,
    cpu,
    datacenter,
    description,
    hostname,
    ipv4,
    ipv6,
    memory,
    password,
    platform,
    public_key,
    storage,
    template,
    users,
});

impl CreateServerParams {
    /// Provider defaults, with a freshly generated hostname.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            bandwidth: 100,
            cpu: 2,
            datacenter: "Falkenberg".to_string(),
            hostname: generate_hostname(),
            ipv4: "any".to_string(),
            ipv6: "any".to_string(),
            memory: 2048,
            platform: "KVM".to_string(),
            storage: 50,
            template: "Debian 11 (Bullseye)".to_string(),
            ..Self::default()
        }
    }

    /// Fill every unset field from [`CreateServerParams::defaults`].
    ///
    /// Fields that are set are kept. A field deliberately set to zero is
    /// treated as unset.
    #[must_use]
    pub fn with_defaults(&self) -> Self {
        self.with_defaults_from(&Self::defaults())
    }

    /// Append one user without touching any other field.
    #[must_use]
    pub fn with_user(
        mut self,
        username: impl Into<String>,
        public_keys: Vec<String>,
        password: impl Into<String>,
    ) -> Self {
        self.users.push(User {
            username: username.into(),
            public_keys,
            password: password.into(),
        });
        self
    }
}

/// Parameters for `server/edit`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditServerParams {
    /// Backup schedules.
    #[serde(rename = "backupschedules", skip_serializing_if = "Vec::is_empty")]
    pub backup: Vec<ServerBackupSchedule>,
    /// Bandwidth in Mbit/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<u32>,
    /// Number of CPU cores.
    #[serde(rename = "cpucores", skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Memory in MB.
    #[serde(rename = "memorysize", skip_serializing_if = "Option::is_none")]
    pub memory: Option<u32>,
    /// Disk size in GB.
    #[serde(rename = "disksize", skip_serializing_if = "Option::is_none")]
    pub storage: Option<u32>,
}

/// Parameters for `server/destroy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DestroyServerParams {
    /// Keep the server's IP addresses on the account.
    #[serde(rename = "keepip")]
    pub keep_ip: bool,
}

/// How `server/stop` shuts a server down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopType {
    /// ACPI shutdown.
    #[default]
    Soft,
    /// Power off.
    Hard,
    /// Restart.
    Reboot,
}

/// Parameters for `server/stop`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StopServerParams {
    /// Shutdown type.
    #[serde(rename = "type")]
    pub kind: StopType,
}

const ADJECTIVES: &[&str] = &[
    "autumn", "hidden", "bitter", "misty", "silent", "empty", "dry", "dark", "summer", "icy",
    "delicate", "quiet", "white", "cool", "spring", "winter", "patient", "twilight", "dawn",
    "crimson", "wispy", "weathered", "blue", "billowing", "broken", "cold", "damp", "falling",
    "frosty", "green", "long", "late", "lingering", "bold", "little", "morning", "muddy", "old",
    "red", "rough", "still", "small", "sparkling", "throbbing", "shy", "wandering", "withered",
    "wild", "black", "young", "holy", "solitary", "fragrant", "aged", "snowy", "proud", "floral",
    "restless", "divine", "polished", "ancient", "purple", "lively", "nameless",
];

const NOUNS: &[&str] = &[
    "waterfall", "river", "breeze", "moon", "rain", "wind", "sea", "morning", "snow", "lake",
    "sunset", "pine", "shadow", "leaf", "dawn", "glitter", "forest", "hill", "cloud", "meadow",
    "sun", "glade", "bird", "brook", "butterfly", "trout", "bush", "dew", "dust", "field", "fire",
    "flower", "firefly", "feather", "grass", "haze", "mountain", "night", "pond", "darkness",
    "snowflake", "silence", "sound", "sky", "shape", "surf", "thunder", "violet", "water",
    "wildflower", "wave", "resonance", "wood", "dream", "cherry", "tree", "fog", "frost",
    "voice", "paper", "frog", "smoke", "star",
];

/// Random `adjective-noun-NNN` hostname.
#[must_use]
pub fn generate_hostname() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("quiet");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("server");
    let number: u16 = rng.gen_range(100..999);
    format!("{adjective}-{noun}-{number}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_defaults_fills_empty_params() {
        let params = CreateServerParams::default().with_defaults();

        assert_eq!(params.bandwidth, 100);
        assert_eq!(params.cpu, 2);
        assert_eq!(params.datacenter, "Falkenberg");
        assert_eq!(params.ipv4, "any");
        assert_eq!(params.ipv6, "any");
        assert_eq!(params.memory, 2048);
        assert_eq!(params.platform, "KVM");
        assert_eq!(params.storage, 50);
        assert_eq!(params.template, "Debian 11 (Bullseye)");
        assert!(!params.hostname.is_empty());
    }

    #[test]
    fn with_defaults_keeps_custom_values() {
        let params = CreateServerParams {
            datacenter: "Stockholm".to_string(),
            memory: 4096,
            hostname: "custom".to_string(),
            ..CreateServerParams::default()
        }
        .with_defaults();

        assert_eq!(params.datacenter, "Stockholm");
        assert_eq!(params.memory, 4096);
        assert_eq!(params.hostname, "custom");
        assert_eq!(params.cpu, 2);
        assert_eq!(params.bandwidth, 100);
    }

    #[test]
    fn with_defaults_does_not_mutate_input() {
        let sparse = CreateServerParams {
            cpu: 4,
            ..CreateServerParams::default()
        };
        let merged = sparse.with_defaults();
        assert_eq!(sparse.datacenter, "");
        assert_eq!(merged.cpu, 4);
    }

    #[test]
    fn with_user_appends_without_merging() {
        let params = CreateServerParams {
            bandwidth: 100,
            cpu: 2,
            datacenter: "Falkenberg".to_string(),
            ipv4: "any".to_string(),
            ipv6: "any".to_string(),
            memory: 2048,
            storage: 20,
            platform: "KVM".to_string(),
            template: "ubuntu-18-04".to_string(),
            hostname: "kvmXXXXXXX".to_string(),
            ..CreateServerParams::default()
        }
        .with_user("glesys", vec!["ssh-rsa".to_string()], "password");

        assert_eq!(
            params.users,
            vec![User {
                username: "glesys".to_string(),
                public_keys: vec!["ssh-rsa".to_string()],
                password: "password".to_string(),
            }]
        );
        assert_eq!(params.storage, 20);
        assert_eq!(params.template, "ubuntu-18-04");
        assert_eq!(params.hostname, "kvmXXXXXXX");
    }

    #[test]
    fn users_survive_with_defaults() {
        let params = CreateServerParams::default()
            .with_user("alice", Vec::new(), "")
            .with_user("bob", vec!["ssh-ed25519 AAAA".to_string()], "")
            .with_defaults();
        assert_eq!(params.users.len(), 2);
        assert_eq!(params.users[1].username, "bob");
    }

    #[test]
    fn create_params_serialize_wire_names() {
        let params = CreateServerParams {
            hostname: "web-1".to_string(),
            ..CreateServerParams::default()
        }
        .with_defaults();
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value["cpucores"], json!(2));
        assert_eq!(value["memorysize"], json!(2048));
        assert_eq!(value["disksize"], json!(50));
        assert_eq!(value["templatename"], json!("Debian 11 (Bullseye)"));
        assert_eq!(value["ip"], json!("any"));
        assert!(value.get("users").is_none());
        assert!(value.get("rootpassword").is_none());
    }

    #[test]
    fn user_omits_empty_optional_fields() {
        let user = User {
            username: "glesys".to_string(),
            ..User::default()
        };
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({"username": "glesys"}));
    }

    #[test]
    fn generated_hostname_has_expected_shape() {
        for _ in 0..50 {
            let hostname = generate_hostname();
            let parts: Vec<&str> = hostname.split('-').collect();
            assert_eq!(parts.len(), 3, "unexpected hostname {hostname}");
            assert!(parts[0].chars().all(char::is_alphanumeric));
            assert!(parts[1].chars().all(char::is_alphanumeric));
            assert_eq!(parts[2].len(), 3);
            assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn server_details_state_helpers() {
        let mut details = ServerDetails::default();
        assert!(!details.is_locked());
        assert!(!details.is_running());

        details.state = "locked".to_string();
        assert!(details.is_locked());

        details.state = "running".to_string();
        assert!(details.is_running());
    }

    #[test]
    fn edit_params_skip_unset_fields() {
        let params = EditServerParams {
            cpu: Some(4),
            ..EditServerParams::default()
        };
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"cpucores": 4}));
    }

    #[test]
    fn stop_type_serializes_lowercase() {
        let params = StopServerParams {
            kind: StopType::Reboot,
        };
        assert_eq!(serde_json::to_value(params).unwrap(), json!({"type": "reboot"}));
    }
}
