use crate::error::Result;
use crate::network::FlowNetwork;

/// Decides whether a flow can saturate every source edge of an elimination network.
/// A network that cannot be saturated means its target team is eliminated.
pub trait FeasibilitySolver {
    fn is_eliminated(&self, network: &FlowNetwork) -> Result<bool>;
}
