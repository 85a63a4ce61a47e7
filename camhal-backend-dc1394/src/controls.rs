//! Feature controls (brightness, exposure, gain, white balance, ...).
//!
//! Every accessor is a live driver round-trip; nothing here is cached.

use crate::camera::Dc1394Camera;
use crate::driver::{BusDriver, CameraDriver};
use crate::error::Result;
use crate::types::{Feature, FeatureMode, FeatureModes};

impl<B: BusDriver> Dc1394Camera<B> {
    pub fn is_feature_present(&self, feature: Feature) -> Result<bool> {
        Ok(self.handle()?.feature_is_present(feature)?)
    }

    pub fn is_feature_readable(&self, feature: Feature) -> Result<bool> {
        Ok(self.handle()?.feature_is_readable(feature)?)
    }

    /// Whether the feature can be switched on and off.
    pub fn is_feature_switchable(&self, feature: Feature) -> Result<bool> {
        Ok(self.handle()?.feature_is_switchable(feature)?)
    }

    pub fn is_feature_enabled(&self, feature: Feature) -> Result<bool> {
        Ok(self.handle()?.feature_get_power(feature)?)
    }

    pub fn set_feature_enabled(&mut self, feature: Feature, enabled: bool) -> Result<()> {
        Ok(self.handle_mut()?.feature_set_power(feature, enabled)?)
    }

    pub fn feature_mode(&self, feature: Feature) -> Result<FeatureMode> {
        Ok(self.handle()?.feature_get_mode(feature)?)
    }

    /// On failure the feature keeps its previous mode.
    pub fn set_feature_mode(&mut self, feature: Feature, mode: FeatureMode) -> Result<()> {
        Ok(self.handle_mut()?.feature_set_mode(feature, mode)?)
    }

    /// Control modes the feature supports.
    pub fn feature_modes(&self, feature: Feature) -> Result<FeatureModes> {
        let modes = self.handle()?.feature_get_modes(feature)?;
        Ok(modes.into_iter().collect())
    }

    /// Value in raw register units.
    pub fn feature_value(&self, feature: Feature) -> Result<u32> {
        Ok(self.handle()?.feature_get_value(feature)?)
    }

    pub fn set_feature_value(&mut self, feature: Feature, value: u32) -> Result<()> {
        Ok(self.handle_mut()?.feature_set_value(feature, value)?)
    }

    /// Value in physical units (seconds, dB, ...).
    pub fn feature_value_absolute(&self, feature: Feature) -> Result<f32> {
        Ok(self.handle()?.feature_get_absolute_value(feature)?)
    }

    pub fn set_feature_value_absolute(&mut self, feature: Feature, value: f32) -> Result<()> {
        Ok(self.handle_mut()?.feature_set_absolute_value(feature, value)?)
    }

    /// `(min, max)` in raw register units.
    pub fn feature_boundaries(&self, feature: Feature) -> Result<(u32, u32)> {
        Ok(self.handle()?.feature_get_boundaries(feature)?)
    }

    /// `(min, max)` in physical units.
    pub fn feature_boundaries_absolute(&self, feature: Feature) -> Result<(f32, f32)> {
        Ok(self.handle()?.feature_get_absolute_boundaries(feature)?)
    }

    /// Whether the feature accepts physical-unit values.
    pub fn has_feature_absolute_control(&self, feature: Feature) -> Result<bool> {
        Ok(self.handle()?.feature_has_absolute_control(feature)?)
    }

    /// Accepted and ignored: no driver call is issued and the camera keeps
    /// its current absolute-control setting. Only the open-state check runs.
    pub fn set_feature_absolute_control(&mut self, feature: Feature, enabled: bool) -> Result<()> {
        self.handle()?;
        tracing::trace!(
            target: "camhal::dc1394",
            ?feature,
            enabled,
            "absolute control switch ignored"
        );
        Ok(())
    }
}
