//! Server service.

use crate::models::{
    CreateServerParams, DestroyServerParams, EditServerParams, Server, ServerConsoleDetails,
    ServerDetails, ServerPlatformTemplates, StopServerParams,
};
use crate::Result;
use glesys_core::{ApiClient, ApiClientExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Operations on the `server/*` endpoints.
#[derive(Clone)]
pub struct ServerService {
    client: Arc<dyn ApiClient>,
}

#[derive(Serialize)]
struct WithServerId<'a, P: Serialize> {
    #[serde(flatten)]
    params: &'a P,
    serverid: &'a str,
}

#[derive(Serialize)]
struct ServerIdParams<'a> {
    serverid: &'a str,
}

#[derive(Deserialize)]
struct ServersPayload {
    #[serde(default)]
    servers: Vec<Server>,
}

#[derive(Deserialize)]
struct ServerPayload {
    server: ServerDetails,
}

#[derive(Deserialize)]
struct ConsolePayload {
    console: ServerConsoleDetails,
}

#[derive(Deserialize)]
struct TemplatesPayload {
    #[serde(default)]
    templates: ServerPlatformTemplates,
}

impl ServerService {
    /// Create a service over `client`.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// List all servers on the project.
    pub async fn list(&self) -> Result<Vec<Server>> {
        let payload: ServersPayload = self.client.get_json("server/list").await?;
        Ok(payload.servers)
    }

    /// Fetch one server, including its power state.
    pub async fn details(&self, server_id: &str) -> Result<ServerDetails> {
        let path = format!("server/details/serverid/{server_id}/includestate/yes");
        let payload: ServerPayload = self.client.get_json(&path).await?;
        Ok(payload.server)
    }

    /// Create a server.
    ///
    /// `params` is sent as given; call [`CreateServerParams::with_defaults`]
    /// first to fill in unset fields.
    pub async fn create(&self, params: &CreateServerParams) -> Result<ServerDetails> {
        debug!(hostname = %params.hostname, platform = %params.platform, "Creating server");
        let payload: ServerPayload = self.client.post_json("server/create", params).await?;
        Ok(payload.server)
    }

    /// Change a server's resources or description.
    pub async fn edit(&self, server_id: &str, params: &EditServerParams) -> Result<ServerDetails> {
        let body = WithServerId {
            params,
            serverid: server_id,
        };
        let payload: ServerPayload = self.client.post_json("server/edit", &body).await?;
        Ok(payload.server)
    }

    /// Destroy a server.
    pub async fn destroy(&self, server_id: &str, params: DestroyServerParams) -> Result<()> {
        debug!(server_id, keep_ip = params.keep_ip, "Destroying server");
        let body = WithServerId {
            params: &params,
            serverid: server_id,
        };
        self.client.post_discard("server/destroy", &body).await?;
        Ok(())
    }

    /// Power a server on.
    pub async fn start(&self, server_id: &str) -> Result<()> {
        let body = ServerIdParams {
            serverid: server_id,
        };
        self.client.post_discard("server/start", &body).await?;
        Ok(())
    }

    /// Shut a server down or reboot it.
    pub async fn stop(&self, server_id: &str, params: StopServerParams) -> Result<()> {
        let body = WithServerId {
            params: &params,
            serverid: server_id,
        };
        self.client.post_discard("server/stop", &body).await?;
        Ok(())
    }

    /// Web console connection details for a server.
    pub async fn console(&self, server_id: &str) -> Result<ServerConsoleDetails> {
        let body = ServerIdParams {
            serverid: server_id,
        };
        let payload: ConsolePayload = self.client.post_json("server/console", &body).await?;
        Ok(payload.console)
    }

    /// Templates available for new servers, grouped by platform.
    pub async fn templates(&self) -> Result<ServerPlatformTemplates> {
        let payload: TemplatesPayload = self.client.post_empty("server/templates").await?;
        Ok(payload.templates)
    }
}
