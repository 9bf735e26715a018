//! 1R1C lumped thermal model of a single zone.

/// Advances the indoor temperature one timestep (forward Euler).
///
/// The zone is a single thermal mass `capacitance` (J/K) coupled to outdoors
/// through the envelope conductance `ua` (W/K):
///
/// ```text
/// Q_env = UA * (T_out - T_in)
/// Q_net = Q_env + Q_int + Q_hvac
/// T(t+dt) = T(t) + dt/C * Q_net
/// ```
///
/// Explicit Euler is stable only while `dt_s * UA / C ≪ 1`; callers must pick
/// a timestep small relative to the thermal time constant `C/UA`
/// ([`crate::SimulationParams`] warns when this is violated).
pub fn step_temperature(
    indoor_temp: f64,
    outdoor_temp: f64,
    ua: f64,
    capacitance: f64,
    q_int_w: f64,
    q_hvac_w: f64,
    dt_s: f64,
) -> f64 {
    // Heat exchange through the building envelope
    let q_env_w = ua * (outdoor_temp - indoor_temp);

    // Net heat flow into the zone
    let q_net_w = q_env_w + q_int_w + q_hvac_w;

    indoor_temp + (dt_s / capacitance) * q_net_w
}
