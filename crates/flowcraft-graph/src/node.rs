//! Node types for workflow graphs.

use std::collections::BTreeMap;

use derive_more::From;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::id::NodeId;

/// Position of a node on the editor canvas.
///
/// The graph stores it for the renderer and never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Kind of a workflow node, without its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// Sends a fixed message to the user.
    Message,
    /// Asks the user a question and captures the answer.
    Prompt,
    /// Invokes an external action.
    Action,
    /// Branches on an expression.
    Condition,
}

/// Configuration of a "send message" node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageConfig {
    /// Text sent to the user.
    pub text: String,
}

/// Configuration of a prompt node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Question shown to the user.
    pub text: String,
    /// Variable the answer is stored in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
}

/// Configuration of an action node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Name of the action to invoke.
    pub name: String,
    /// Action parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, serde_json::Value>,
}

/// Configuration of a condition node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConditionConfig {
    /// Expression evaluated against the conversation state.
    pub expression: String,
    /// Labels of the outgoing branches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
}

/// Kind-specific node configuration.
///
/// Each variant carries the payload its kind requires, so a prompt node can
/// never be handed an action's parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, From)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeConfig {
    /// Sends a fixed message.
    Message(MessageConfig),
    /// Asks a question.
    Prompt(PromptConfig),
    /// Invokes an action.
    Action(ActionConfig),
    /// Branches on an expression.
    Condition(ConditionConfig),
}

impl NodeConfig {
    /// Creates a message config.
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(MessageConfig { text: text.into() })
    }

    /// Creates a prompt config without an answer variable.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self::Prompt(PromptConfig {
            text: text.into(),
            variable: None,
        })
    }

    /// Creates an action config without parameters.
    pub fn action(name: impl Into<String>) -> Self {
        Self::Action(ActionConfig {
            name: name.into(),
            params: BTreeMap::new(),
        })
    }

    /// Creates a condition config without branch labels.
    pub fn condition(expression: impl Into<String>) -> Self {
        Self::Condition(ConditionConfig {
            expression: expression.into(),
            branches: Vec::new(),
        })
    }

    /// Returns the kind of this config.
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Message(_) => NodeKind::Message,
            Self::Prompt(_) => NodeKind::Prompt,
            Self::Action(_) => NodeKind::Action,
            Self::Condition(_) => NodeKind::Condition,
        }
    }
}

impl From<NodeKind> for NodeConfig {
    /// Returns an empty config of the given kind.
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Message => Self::Message(MessageConfig::default()),
            NodeKind::Prompt => Self::Prompt(PromptConfig::default()),
            NodeKind::Action => Self::Action(ActionConfig::default()),
            NodeKind::Condition => Self::Condition(ConditionConfig::default()),
        }
    }
}

/// A node in a workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable node id, assigned when the node is added.
    pub id: NodeId,
    /// Canvas position.
    #[serde(default)]
    pub position: Position,
    /// Kind-specific configuration.
    #[serde(flatten)]
    pub config: NodeConfig,
}

impl Node {
    /// Creates a node with the given id.
    pub fn new(id: NodeId, config: impl Into<NodeConfig>, position: Position) -> Self {
        Self {
            id,
            position,
            config: config.into(),
        }
    }

    /// Returns the kind of this node.
    #[inline]
    pub const fn kind(&self) -> NodeKind {
        self.config.kind()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_config_kind() {
        assert_eq!(NodeConfig::message("hi").kind(), NodeKind::Message);
        assert_eq!(NodeConfig::prompt("name?").kind(), NodeKind::Prompt);
        assert_eq!(NodeConfig::action("lookup").kind(), NodeKind::Action);
        assert_eq!(NodeConfig::condition("x > 1").kind(), NodeKind::Condition);
    }

    #[test]
    fn test_empty_config_from_kind() {
        let config = NodeConfig::from(NodeKind::Prompt);
        assert_eq!(config, NodeConfig::Prompt(PromptConfig::default()));
    }

    #[test]
    fn test_kind_string_forms() {
        assert_eq!(NodeKind::Condition.as_ref(), "condition");
        assert_eq!("action".parse::<NodeKind>(), Ok(NodeKind::Action));
    }

    #[test]
    fn test_node_serialization_is_tagged() {
        let node = Node::new(
            NodeId::from_uuid(Uuid::from_u128(1)),
            NodeConfig::message("Hello"),
            Position::new(10.0, 20.0),
        );

        let json = serde_json::to_value(&node).expect("serialization failed");
        assert_eq!(json["kind"], "message");
        assert_eq!(json["text"], "Hello");
        assert_eq!(json["position"]["x"], 10.0);

        let back: Node = serde_json::from_value(json).expect("deserialization failed");
        assert_eq!(back, node);
    }

    #[test]
    fn test_action_params_are_kept() {
        let mut action = ActionConfig {
            name: "http_request".into(),
            ..Default::default()
        };
        action
            .params
            .insert("url".into(), serde_json::json!("https://example.com"));

        let node = Node::new(NodeId::new(), action, Position::default());
        let json = serde_json::to_string(&node).expect("serialization failed");
        let back: Node = serde_json::from_str(&json).expect("deserialization failed");

        let NodeConfig::Action(config) = back.config else {
            panic!("expected an action config");
        };
        assert_eq!(config.params["url"], "https://example.com");
    }
}
