// src/ledger.rs
use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, trace, warn};

use crate::asset::{Asset, ScanValue};
use crate::context::{TRANSIENT_PROPERTIES, TransactionContext};
use crate::error::Error;
use crate::host::{EventSink, PrivateData, WorldState};

/// Attribute a credential must carry to create records.
pub const CREATOR_ATTRIBUTE: &str = "abac.creator";

fn implicit_collection(org: &str) -> String {
    format!("_implicit_org_{org}")
}

fn encode(asset: &Asset) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(asset).map_err(|e| Error::Serialize(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Asset, Error> {
    serde_json::from_slice(bytes).map_err(|e| Error::Deserialize(e.to_string()))
}

/// The asset record service. Composes the injected host capabilities into
/// the record lifecycle: ABAC-gated creation, ownership-gated mutation,
/// organization-scoped private mirroring, and commit-time events.
///
/// Two authorization policies, never unified: creation requires the
/// [`CREATOR_ATTRIBUTE`] on the caller's credential; update, delete, and
/// transfer require exact equality between the resolved caller identity
/// and the stored owner.
pub struct AssetLedger {
    world: Arc<dyn WorldState>,
    private: Arc<dyn PrivateData>,
    events: Arc<dyn EventSink>,
    local_org: String,
}

impl AssetLedger {
    pub fn new(
        world: Arc<dyn WorldState>,
        private: Arc<dyn PrivateData>,
        events: Arc<dyn EventSink>,
        local_org: impl Into<String>,
    ) -> Self {
        Self {
            world,
            private,
            events,
            local_org: local_org.into(),
        }
    }

    /// Issue a new asset owned by the caller.
    pub async fn create_asset(
        &self,
        ctx: &TransactionContext,
        id: &str,
        color: &str,
        size: i64,
        appraised_value: i64,
    ) -> Result<(), Error> {
        let caller = ctx.identity().resolve_identity()?;
        if !ctx.identity().has_attribute(CREATOR_ATTRIBUTE, "true")? {
            return Err(Error::Unauthorized(format!(
                "identity {} does not carry {}=true",
                caller, CREATOR_ATTRIBUTE
            )));
        }
        if self.asset_exists(ctx, id).await? {
            return Err(Error::AlreadyExists(id.to_string()));
        }

        let asset = Asset::new(id, color, size, &caller, appraised_value);
        let payload = encode(&asset)?;

        self.mirror_private(ctx, id).await?;
        self.events.emit("CreateAsset", &payload);
        self.world.put(id, payload).await?;

        counter!("ktema.mutations.total", "op" => "create").increment(1);
        debug!(tx_id = %ctx.tx_id(), id, owner = %caller, "asset created");
        Ok(())
    }

    /// Read an asset, merging private properties when the caller belongs
    /// to the organization that holds them.
    pub async fn read_asset(&self, ctx: &TransactionContext, id: &str) -> Result<Asset, Error> {
        let asset = self.read_state(id).await?;
        self.merge_private(ctx, asset).await
    }

    /// Overwrite color, size, and appraised value. The owner field does
    /// not change on this path.
    pub async fn update_asset(
        &self,
        ctx: &TransactionContext,
        id: &str,
        color: &str,
        size: i64,
        appraised_value: i64,
    ) -> Result<(), Error> {
        let caller = ctx.identity().resolve_identity()?;
        let mut asset = self.read_state(id).await?;
        if caller != asset.owner {
            return Err(Error::Unauthorized(format!(
                "identity {} does not own asset {}",
                caller, id
            )));
        }

        asset.color = color.to_string();
        asset.size = size;
        asset.appraised_value = appraised_value;
        let payload = encode(&asset)?;

        self.mirror_private(ctx, id).await?;
        self.events.emit("UpdateAsset", &payload);
        self.world.put(id, payload).await?;

        counter!("ktema.mutations.total", "op" => "update").increment(1);
        debug!(tx_id = %ctx.tx_id(), id, "asset updated");
        Ok(())
    }

    /// Remove an asset and its private mirror. The event carries the
    /// record as it existed before deletion.
    pub async fn delete_asset(&self, ctx: &TransactionContext, id: &str) -> Result<(), Error> {
        let caller = ctx.identity().resolve_identity()?;
        let asset = self.read_state(id).await?;
        if caller != asset.owner {
            return Err(Error::Unauthorized(format!(
                "identity {} does not own asset {}",
                caller, id
            )));
        }

        let payload = encode(&asset)?;

        self.drop_private(ctx, id).await?;
        self.events.emit("DeleteAsset", &payload);
        self.world.delete(id).await?;

        counter!("ktema.mutations.total", "op" => "delete").increment(1);
        debug!(tx_id = %ctx.tx_id(), id, "asset deleted");
        Ok(())
    }

    /// Existence probe. False for a missing key; only storage failures
    /// propagate.
    pub async fn asset_exists(&self, ctx: &TransactionContext, id: &str) -> Result<bool, Error> {
        trace!(tx_id = %ctx.tx_id(), id, "existence probe");
        Ok(self.world.get(id).await?.is_some())
    }

    /// Hand the asset to a new owner.
    pub async fn transfer_asset(
        &self,
        ctx: &TransactionContext,
        id: &str,
        new_owner: &str,
    ) -> Result<(), Error> {
        let caller = ctx.identity().resolve_identity()?;
        let mut asset = self.read_state(id).await?;
        if caller != asset.owner {
            return Err(Error::Unauthorized(format!(
                "identity {} does not own asset {}",
                caller, id
            )));
        }

        asset.owner = new_owner.to_string();
        let payload = encode(&asset)?;

        self.events.emit("TransferAsset", &payload);
        self.world.put(id, payload).await?;

        counter!("ktema.mutations.total", "op" => "transfer").increment(1);
        debug!(tx_id = %ctx.tx_id(), id, new_owner, "asset transferred");
        Ok(())
    }

    /// Fresh open-bounds scan over the whole namespace, in the store's
    /// key order. A record that fails to decode comes back raw rather
    /// than failing the scan.
    pub async fn list_all_assets(
        &self,
        ctx: &TransactionContext,
    ) -> Result<Vec<(String, ScanValue)>, Error> {
        let start = Instant::now();
        let entries = self.world.scan("", "").await?;

        let mut assets = Vec::with_capacity(entries.len());
        for (key, bytes) in entries {
            match serde_json::from_slice::<Asset>(&bytes) {
                Ok(asset) => assets.push((key, ScanValue::Asset(asset))),
                Err(err) => {
                    warn!(tx_id = %ctx.tx_id(), key = %key, %err, "undecodable record, returning raw");
                    assets.push((key, ScanValue::Raw(String::from_utf8_lossy(&bytes).into_owned())));
                }
            }
        }

        histogram!("ktema.scan.duration_ms").record(start.elapsed().as_millis() as f64);
        Ok(assets)
    }

    async fn read_state(&self, id: &str) -> Result<Asset, Error> {
        let bytes = self
            .world
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        decode(&bytes)
    }

    /// Write the transient properties payload into the local
    /// organization's implicit collection. A no-op when the caller
    /// belongs to another organization or supplied no payload.
    async fn mirror_private(&self, ctx: &TransactionContext, key: &str) -> Result<(), Error> {
        if ctx.identity().organization()? != self.local_org {
            return Ok(());
        }
        let Some(properties) = ctx.transient(TRANSIENT_PROPERTIES) else {
            return Ok(());
        };

        let collection = implicit_collection(&self.local_org);
        self.private
            .put_private(&collection, key, properties.to_vec())
            .await?;

        // Log the digest, never the payload.
        let digest = blake3::hash(properties).to_hex();
        debug!(tx_id = %ctx.tx_id(), key, digest = %digest, "private properties mirrored");
        Ok(())
    }

    async fn drop_private(&self, ctx: &TransactionContext, key: &str) -> Result<(), Error> {
        if ctx.identity().organization()? != self.local_org {
            return Ok(());
        }
        let collection = implicit_collection(&self.local_org);
        self.private.delete_private(&collection, key).await
    }

    /// Merge the private entry for this key into the record, only when
    /// the caller's organization is the one holding the collection and an
    /// entry actually exists.
    async fn merge_private(
        &self,
        ctx: &TransactionContext,
        mut asset: Asset,
    ) -> Result<Asset, Error> {
        if ctx.identity().organization()? != self.local_org {
            return Ok(asset);
        }

        let collection = implicit_collection(&self.local_org);
        if let Some(bytes) = self.private.get_private(&collection, &asset.id).await? {
            let properties =
                String::from_utf8(bytes).map_err(|e| Error::Deserialize(e.to_string()))?;
            asset.properties = Some(properties);
        }
        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_collection_name() {
        assert_eq!(implicit_collection("Org1"), "_implicit_org_Org1");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode(b"not json"), Err(Error::Deserialize(_))));
    }
}
