//! Reaction event types.

use std::fmt;

/// The platform message a reaction was applied to.
///
/// The dispatcher treats messages as opaque; it only reads identifiers for
/// log correlation and for matching registered hooks.
///
/// # Example
///
/// ```rust,ignore
/// struct DiscordMessage { id: String, channel: String, content: String }
///
/// impl MessageContext for DiscordMessage {
///     fn message_id(&self) -> &str { &self.id }
///     fn channel_id(&self) -> &str { &self.channel }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid MessageContext",
    label = "missing `MessageContext` implementation",
    note = "Messages must be `Send + Sync + 'static` and expose their message and channel ids."
)]
pub trait MessageContext: Send + Sync + 'static {
    /// Identifier of the message.
    fn message_id(&self) -> &str;

    /// Identifier of the channel the message lives in.
    fn channel_id(&self) -> &str;
}

/// A minimal message carrying only its identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageRef {
    /// Message id.
    pub id: String,
    /// Channel id.
    pub channel_id: String,
}

impl MessageRef {
    /// Create a new message reference.
    pub fn new(id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
        }
    }
}

impl MessageContext for MessageRef {
    fn message_id(&self) -> &str {
        &self.id
    }

    fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

impl<T: MessageContext> MessageContext for std::sync::Arc<T> {
    fn message_id(&self) -> &str {
        (**self).message_id()
    }

    fn channel_id(&self) -> &str {
        (**self).channel_id()
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// An emoji identifier, either a unicode emoji or a platform custom emoji id.
    Emoji
);

string_id!(
    /// Identifier of the user who applied the reaction.
    UserId
);

/// A user applying an emoji to an existing message.
#[derive(Debug, Clone)]
pub struct ReactionEvent<M> {
    /// The message that was reacted to.
    pub message: M,
    /// The emoji applied.
    pub emoji: Emoji,
    /// The user who reacted.
    pub user_id: UserId,
}

impl<M: MessageContext> ReactionEvent<M> {
    /// Create a new reaction event.
    pub fn new(message: M, emoji: impl Into<Emoji>, user_id: impl Into<UserId>) -> Self {
        Self {
            message,
            emoji: emoji.into(),
            user_id: user_id.into(),
        }
    }

    /// An owned, loggable identity of this event.
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            message_id: self.message.message_id().to_owned(),
            channel_id: self.message.channel_id().to_owned(),
            emoji: self.emoji.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

/// The identity of a reaction event, used for log correlation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    /// Message id.
    pub message_id: String,
    /// Channel id.
    pub channel_id: String,
    /// Emoji applied.
    pub emoji: Emoji,
    /// Reacting user.
    pub user_id: UserId,
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on message {} in channel {} by user {}",
            self.emoji, self.message_id, self.channel_id, self.user_id
        )
    }
}
