mod policy;

pub use policy::GapFollower;
pub use policy::IdlePolicy;
pub use policy::Policy;
pub use policy::RandomPolicy;
