//! Aging, energy decay and depth motion shared by every kind

use crate::colony::agent::Agent;
use crate::core::config::SimulationConfig;

/// Advance age and drain energy for one tick; energy bottoms out at zero
pub fn age(agent: &mut Agent, config: &SimulationConfig) {
    agent.age += config.age_increment;
    agent.energy = (agent.energy - config.energy_decay).max(0.0);
}

/// Move along z and bounce off the depth bounds
pub fn drift_depth(agent: &mut Agent, depth_max: f32) {
    agent.position.z += agent.velocity.z;
    if agent.position.z < 0.0 {
        agent.position.z = 0.0;
        agent.velocity.z = agent.velocity.z.abs();
    } else if agent.position.z > depth_max {
        agent.position.z = depth_max;
        agent.velocity.z = -agent.velocity.z.abs();
    }
}
