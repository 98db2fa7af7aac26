//! The named management queries

use std::fmt;

/// Read-only queries issued against the subscription endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Query {
    /// `GET /services/hostedservices`
    HostedServices,
    /// `GET /services/resourceextensions`
    ResourceExtensions,
    /// `GET /services/storageservices`
    StorageAccounts,
    /// `GET /locations`, sent below the subscription like every other query:
    /// `<base>/<subscription-id>/locations`, not the base-level `<base>/locations`.
    Locations,
}

impl Query {
    /// Every query, in the order a default run issues them
    pub const ALL: [Query; 4] = [
        Query::HostedServices,
        Query::ResourceExtensions,
        Query::StorageAccounts,
        Query::Locations,
    ];

    /// Resource path appended to the subscription endpoint
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Query::HostedServices => "/services/hostedservices",
            Query::ResourceExtensions => "/services/resourceextensions",
            Query::StorageAccounts => "/services/storageservices",
            Query::Locations => "/locations",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Query::HostedServices => "hosted-services",
            Query::ResourceExtensions => "resource-extensions",
            Query::StorageAccounts => "storage-accounts",
            Query::Locations => "locations",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
