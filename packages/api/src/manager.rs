//! `ServiceManager`: one provisioned certificate, one TLS context, many queries

use std::future::Future;
use std::io::Write;

use azmgmt_client::error;
use azmgmt_client::prelude::*;

use crate::query::Query;

/// How a run of queries ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every query was answered
    Completed,
    /// The shutdown signal fired first; later queries were not sent
    Interrupted,
}

/// Authenticated handle on one subscription.
///
/// [`ServiceManager::connect`] runs the provisioning pipeline once; every query
/// afterwards reuses the same TLS context. The persisted keystore is removed by
/// [`ServiceManager::close`] or when the manager is dropped.
#[derive(Debug)]
pub struct ServiceManager {
    // declared before `store` so the context is released first
    client: ApiClient,
    store: ProvisionedStore,
}

impl ServiceManager {
    /// Extract the certificate, provision the keystore and build the TLS context.
    ///
    /// Performs no network I/O. On failure any store file already written is
    /// removed before the error is returned.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let credential = extract_credential(&config.publish_settings)?;

        let listed = &credential.metadata().subscriptions;
        if !listed.is_empty() && !credential.metadata().lists_subscription(&config.subscription_id) {
            tracing::warn!(
                "Subscription {} is not listed in {} ({} listed)",
                config.subscription_id,
                credential.origin().display(),
                listed.len()
            );
        }

        let endpoint = ApiEndpoint::new(&config.endpoint, &config.subscription_id)?;
        let store = provision(&credential, &config.store_path)?;
        let context = TlsContextFactory::new(config.tls).build(&store)?;
        let client = ApiClient::new(context, endpoint).with_api_version(config.api_version);

        tracing::info!("Service manager ready for {}", client.endpoint());
        Ok(Self { client, store })
    }

    pub async fn hosted_services(&self) -> Result<ApiResponse> {
        self.run(Query::HostedServices).await
    }

    pub async fn resource_extensions(&self) -> Result<ApiResponse> {
        self.run(Query::ResourceExtensions).await
    }

    pub async fn storage_accounts(&self) -> Result<ApiResponse> {
        self.run(Query::StorageAccounts).await
    }

    /// Locations available to the subscription
    pub async fn locations(&self) -> Result<ApiResponse> {
        self.run(Query::Locations).await
    }

    pub async fn run(&self, query: Query) -> Result<ApiResponse> {
        self.get(query.path()).await
    }

    /// GET an arbitrary resource path below the subscription endpoint.
    pub async fn get(&self, resource_path: &str) -> Result<ApiResponse> {
        self.client.get(resource_path).await
    }

    /// Issue `queries` in order and write each formatted body, one per line,
    /// to `out`.
    ///
    /// The first failure stops the run. Bodies already written stay in `out`.
    pub async fn run_queries<W: Write>(
        &self,
        queries: &[Query],
        formatter: &dyn ResponseFormatter,
        out: &mut W,
    ) -> Result<()> {
        for &query in queries {
            let response = self.run(query).await?;
            tracing::info!("{} answered {}", query, response.status);
            writeln!(out, "{}", formatter.format(&response.body)).map_err(error::output)?;
            out.flush().map_err(error::output)?;
        }
        Ok(())
    }

    /// [`ServiceManager::run_queries`], abandoned if `shutdown` resolves first,
    /// followed by [`ServiceManager::close`].
    ///
    /// The keystore file is removed however the run ends.
    pub async fn run_until<W, S>(
        self,
        queries: &[Query],
        formatter: &dyn ResponseFormatter,
        out: &mut W,
        shutdown: S,
    ) -> Result<RunOutcome>
    where
        W: Write,
        S: Future<Output = ()>,
    {
        let outcome = tokio::select! {
            result = self.run_queries(queries, formatter, out) => result.map(|()| RunOutcome::Completed),
            () = shutdown => {
                tracing::warn!("Shutdown requested, remaining queries abandoned");
                Ok(RunOutcome::Interrupted)
            }
        };

        let closed = self.close();
        let outcome = outcome?;
        closed?;
        Ok(outcome)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> &ProvisionedStore {
        &self.store
    }

    /// Release the TLS context and delete the persisted keystore.
    pub fn close(self) -> Result<()> {
        let Self { client, store } = self;
        drop(client);
        store.close()
    }
}
