/// One `<Subscription>` entry listed under the publish profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionEntry {
    pub id: String,
    pub name: Option<String>,
}

/// Identifying attributes of the publish profile. Informational only; the
/// subscription used for queries is configured separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMetadata {
    pub publish_method: Option<String>,
    pub url: Option<String>,
    pub subscriptions: Vec<SubscriptionEntry>,
}

impl ProfileMetadata {
    pub(crate) fn from_profile(profile: &roxmltree::Node<'_, '_>) -> Self {
        let subscriptions = profile
            .children()
            .filter(|node| node.has_tag_name("Subscription"))
            .filter_map(|node| {
                node.attribute("Id").map(|id| SubscriptionEntry {
                    id: id.to_string(),
                    name: node.attribute("Name").map(str::to_string),
                })
            })
            .collect();

        Self {
            publish_method: profile.attribute("PublishMethod").map(str::to_string),
            url: profile.attribute("Url").map(str::to_string),
            subscriptions,
        }
    }

    /// Whether the document lists a subscription with this id (case-insensitive).
    #[must_use]
    pub fn lists_subscription(&self, id: &str) -> bool {
        self.subscriptions
            .iter()
            .any(|entry| entry.id.eq_ignore_ascii_case(id))
    }
}
