// pm-core/src/units.rs

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, ElectricCurrent as UomElectricCurrent,
    ElectricPotential as UomElectricPotential, ElectricalResistance as UomElectricalResistance,
    Length as UomLength, MagneticFluxDensity as UomMagneticFluxDensity, Mass as UomMass,
    Power as UomPower, Ratio as UomRatio, Torque as UomTorque,
};

// Public canonical unit types (SI, f64)
pub type AngularVelocity = UomAngularVelocity;
pub type Current = UomElectricCurrent;
pub type FluxDensity = UomMagneticFluxDensity;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Power = UomPower;
pub type Ratio = UomRatio;
pub type Resistance = UomElectricalResistance;
pub type Torque = UomTorque;
pub type Voltage = UomElectricPotential;

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn amperes(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

#[inline]
pub fn volts(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn ohms(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn tesla(v: f64) -> FluxDensity {
    use uom::si::magnetic_flux_density::tesla;
    FluxDensity::new::<tesla>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn newton_meters(v: f64) -> Torque {
    use uom::si::torque::newton_meter;
    Torque::new::<newton_meter>(v)
}

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = mm(170.0);
        let _i = amperes(25.7);
        let _u = volts(380.0);
        let _r = ohms(0.21);
        let _b = tesla(0.8);
        let _p = watts(15_000.0);
        let _m = kg(3.3);
        let _t = newton_meters(95.5);
        let _w = rad_per_s(157.0);
        let _k = unitless(0.95);
    }

    #[test]
    fn millimeters_are_stored_in_meters() {
        assert!((mm(170.0).value - 0.17).abs() < 1e-12);
    }
}
