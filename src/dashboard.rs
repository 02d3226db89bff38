//! Per-invocation pipeline: credential lookup, refresh, persistence, station fetch, transform.
//!
//! [`Dashboard::on_input`] runs one invocation end to end. The refresh half
//! ([`Dashboard::refresh_credentials`]) holds a per-identity async mutex from lookup until the
//! rotated refresh token is both cached and stored, so overlapping invocations for the same
//! identity rotate one after the other and never exchange the same refresh token twice.
//! Invocations for different identities proceed independently.

// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, Identity, TokenSecret, TokenSet},
	cache::CredentialCache,
	config::DashboardConfig,
	error::{FetchError, InvocationFailure},
	http::ApiHttpClient,
	obs::{FlowKind, FlowSpan},
	refresh::{RefreshMetrics, TokenRefresher},
	station::{DashboardMessage, DashboardPayload},
	store::CredentialStore,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, store::FileStore};

#[cfg(feature = "reqwest")]
/// Dashboard specialized for the crate's default reqwest transport.
pub type ReqwestDashboard = Dashboard<ReqwestHttpClient>;

/// Coordinates credential rotation and station data retrieval for any number of identities.
pub struct Dashboard<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Endpoint and transport settings.
	pub config: DashboardConfig,
	/// Durable credential storage.
	pub store: Arc<dyn CredentialStore>,
	/// Host-visible credential registry.
	pub cache: Arc<dyn CredentialCache>,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	http_client: Arc<C>,
	refresher: TokenRefresher<C>,
	refresh_guards: Arc<Mutex<HashMap<Identity, Arc<AsyncMutex<()>>>>>,
}
impl<C> Dashboard<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a dashboard that reuses the caller-provided transport.
	pub fn with_http_client(
		config: DashboardConfig,
		store: Arc<dyn CredentialStore>,
		cache: Arc<dyn CredentialCache>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		let http_client = http_client.into();
		let refresher = TokenRefresher::new(http_client.clone(), config.token_endpoint.clone());

		Self {
			config,
			store,
			cache,
			refresh_metrics: Default::default(),
			http_client,
			refresher,
			refresh_guards: Default::default(),
		}
	}

	/// Publishes the stored record for `identity` to the cache, if one exists.
	///
	/// Mirrors configuration-time startup; returns whether a record was found.
	pub async fn init(&self, identity: &Identity) -> Result<bool> {
		match self.store.load(identity).await? {
			Some(record) => {
				self.cache.add_credentials(identity, record);

				Ok(true)
			},
			None => Ok(false),
		}
	}

	/// Records first-time credentials for `identity` in both the store and the cache.
	pub async fn configure(&self, identity: &Identity, record: CredentialRecord) -> Result<()> {
		let guard = self.refresh_guard(identity);
		let _serialized = guard.lock().await;

		self.store.save(identity, record.clone()).await?;
		self.cache.add_credentials(identity, record);

		Ok(())
	}

	/// Exchanges the current refresh token for `identity` and persists the rotated one.
	///
	/// The cache is consulted first and the store second; with neither holding a record the
	/// call fails with [`Error::ConfigurationMissing`]. On success the rotated record is pushed
	/// to the cache and then saved, and the fresh token pair is returned. A failed exchange
	/// leaves both untouched.
	pub async fn refresh_credentials(&self, identity: &Identity) -> Result<TokenSet> {
		FlowSpan::new(FlowKind::Refresh, "refresh_credentials")
			.observe(self.refresh_serialized(identity))
			.await
	}

	/// Requests the station list with `access_token` and returns the parsed JSON body.
	pub async fn fetch_station_data(&self, access_token: &TokenSecret) -> Result<JsonValue> {
		FlowSpan::new(FlowKind::StationData, "fetch_station_data")
			.observe(self.request_station_data(access_token))
			.await
	}

	/// Runs one full invocation for `identity` and returns both station views.
	pub async fn process(&self, identity: &Identity) -> Result<DashboardPayload> {
		let tokens = self.refresh_credentials(identity).await?;
		let raw = self.fetch_station_data(&tokens.access_token).await?;

		DashboardPayload::from_raw(raw).map_err(|source| FetchError::Malformed { source }.into())
	}

	/// Host entry point: runs [`Dashboard::process`] for one inbound event.
	///
	/// On failure nothing is emitted; the error comes back together with the untouched input.
	pub async fn on_input<T>(
		&self,
		identity: &Identity,
		input: T,
	) -> Result<DashboardMessage, InvocationFailure<T>> {
		match self.process(identity).await {
			Ok(payload) => Ok(DashboardMessage { payload }),
			Err(error) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(%identity, %error, "dashboard invocation failed");

				Err(InvocationFailure { error, input })
			},
		}
	}

	async fn refresh_serialized(&self, identity: &Identity) -> Result<TokenSet> {
		self.refresh_metrics.record_attempt();

		let guard = self.refresh_guard(identity);
		let _serialized = guard.lock().await;
		let result = self.rotate_locked(identity).await;

		self.refresh_metrics.record_result(&result);

		result
	}

	async fn request_station_data(&self, access_token: &TokenSecret) -> Result<JsonValue> {
		let response = self
			.http_client
			.get_with_bearer(&self.config.station_endpoint, access_token.expose())
			.await
			.map_err(FetchError::Transport)?;

		if !response.is_ok() {
			return Err(
				FetchError::Status { status: response.status, body: response.body_text() }.into()
			);
		}

		let mut de = serde_json::Deserializer::from_slice(&response.body);
		let body = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| FetchError::Malformed { source })?;

		Ok(body)
	}

	async fn rotate_locked(&self, identity: &Identity) -> Result<TokenSet> {
		let current = self.lookup_credentials(identity).await?;
		let tokens = self.refresher.refresh(&current).await?;
		let rotated = current.rotated(tokens.refresh_token.clone());

		self.cache.add_credentials(identity, rotated.clone());
		self.store.save(identity, rotated).await?;

		#[cfg(feature = "tracing")]
		tracing::debug!(%identity, expires_at = ?tokens.expires_at(), "refresh token rotated");

		Ok(tokens)
	}

	async fn lookup_credentials(&self, identity: &Identity) -> Result<CredentialRecord> {
		if let Some(record) = self.cache.get_credentials(identity) {
			return Ok(record);
		}

		match self.store.load(identity).await? {
			Some(record) => {
				self.cache.add_credentials(identity, record.clone());

				Ok(record)
			},
			None => {
				#[cfg(feature = "tracing")]
				tracing::warn!(%identity, "no credentials configured");

				Err(Error::ConfigurationMissing { identity: identity.clone() })
			},
		}
	}

	// One entry per identity ever refreshed, never pruned; identities are bounded by the host
	// configuration.
	fn refresh_guard(&self, identity: &Identity) -> Arc<AsyncMutex<()>> {
		let mut guards = self.refresh_guards.lock();

		guards.entry(identity.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
	}
}
#[cfg(feature = "reqwest")]
impl Dashboard<ReqwestHttpClient> {
	/// Creates a dashboard with a [`FileStore`] at `config.store_path` and a reqwest transport
	/// honoring the configured timeout and user agent.
	pub fn new(config: DashboardConfig, cache: Arc<dyn CredentialCache>) -> Result<Self> {
		let http_client = ReqwestHttpClient::from_config(&config)?;
		let store = Arc::new(FileStore::new(config.store_path.clone()));

		Ok(Self::with_http_client(config, store, cache, http_client))
	}
}
impl<C> Clone for Dashboard<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			store: self.store.clone(),
			cache: self.cache.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			http_client: self.http_client.clone(),
			refresher: self.refresher.clone(),
			refresh_guards: self.refresh_guards.clone(),
		}
	}
}
impl<C> Debug for Dashboard<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dashboard")
			.field("token_endpoint", &self.config.token_endpoint)
			.field("station_endpoint", &self.config.station_endpoint)
			.finish()
	}
}
