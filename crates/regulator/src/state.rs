use crate::events::RegulatorEvent;
use async_channel::{Receiver, Sender};
use dial::{
    AngularConfig, Color, Decimals, GradientError, GradientStop, GradientWheel, Point, Unit,
    ValueDomain,
};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single-color value bar.
    #[default]
    Plain,
    /// Gradient ring with a live value-to-color lookup.
    Color,
}

/// Annulus around the center where a press starts a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingArea {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl RingArea {
    pub fn contains(&self, center: Point, pointer: Point) -> bool {
        let dist = center.distance_to(pointer);
        dist >= self.inner_radius && dist <= self.outer_radius
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerAction {
    pub should_redraw: bool,
    pub committed: bool,
}

impl PointerAction {
    pub fn new(should_redraw: bool, committed: bool) -> Self {
        Self {
            should_redraw,
            committed,
        }
    }
}

/// State behind one rotary regulator.
///
/// Pointer input arrives through [`press`](Self::press), [`drag_to`](Self::drag_to)
/// and [`release`](Self::release). Each accepted sample is clamped into the domain
/// and announced as [`RegulatorEvent::ValueChanged`] to every subscriber; the end of
/// a gesture is announced once as [`RegulatorEvent::TargetCommitted`].
#[derive(Debug)]
pub struct Regulator {
    domain: ValueDomain,
    geometry: AngularConfig,
    wheel: Option<GradientWheel>,
    drag: DragState,
    ring: Option<RingArea>,
    decimals: Decimals,
    unit: Unit,
    bar_color: Color,
    switched_on: bool,
    subscribers: Vec<Sender<RegulatorEvent>>,
}

impl Regulator {
    pub fn new(domain: ValueDomain, geometry: AngularConfig) -> Self {
        Self {
            domain,
            geometry,
            wheel: None,
            drag: DragState::Idle,
            ring: None,
            decimals: Decimals::default(),
            unit: Unit::default(),
            bar_color: Color::cyan(),
            switched_on: true,
            subscribers: Vec::new(),
        }
    }

    /// A color-mode regulator driven by `wheel`.
    pub fn with_gradient(
        domain: ValueDomain,
        geometry: AngularConfig,
        wheel: GradientWheel,
    ) -> Self {
        Self {
            wheel: Some(wheel),
            ..Self::new(domain, geometry)
        }
    }

    pub fn with_ring(mut self, ring: RingArea) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn with_decimals(mut self, decimals: Decimals) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_bar_color(mut self, color: Color) -> Self {
        self.bar_color = color;
        self
    }

    pub fn subscribe(&mut self) -> Receiver<RegulatorEvent> {
        let (tx, rx) = async_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: RegulatorEvent) {
        // unbounded senders only fail once the receiver is gone
        self.subscribers.retain(|tx| tx.try_send(event).is_ok());
    }

    pub fn mode(&self) -> Mode {
        if self.wheel.is_some() {
            Mode::Color
        } else {
            Mode::Plain
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn domain(&self) -> &ValueDomain {
        &self.domain
    }

    pub fn geometry(&self) -> &AngularConfig {
        &self.geometry
    }

    pub fn value(&self) -> f64 {
        self.domain.value()
    }

    pub fn min_value(&self) -> f64 {
        self.domain.min()
    }

    pub fn max_value(&self) -> f64 {
        self.domain.max()
    }

    pub fn angle_step(&self) -> f64 {
        self.domain.angle_step(self.geometry.angle_range())
    }

    pub fn indicator_angle(&self) -> f64 {
        self.geometry
            .value_to_indicator_angle(self.domain.value(), &self.domain)
    }

    pub fn bar_extent(&self) -> f64 {
        self.geometry.bar_extent(self.domain.value(), &self.domain)
    }

    /// Current color in color mode while switched on; `None` for a plain regulator
    /// or after [`switch_off`](Self::switch_off).
    pub fn color(&self) -> Option<Color> {
        self.wheel
            .as_ref()
            .filter(|_| self.switched_on)
            .map(|wheel| wheel.color_at(self.domain.value(), &self.domain))
    }

    pub fn rendering_stops(&self) -> Option<&[GradientStop]> {
        self.wheel.as_ref().map(GradientWheel::rendering_stops)
    }

    pub fn wheel(&self) -> Option<&GradientWheel> {
        self.wheel.as_ref()
    }

    pub fn decimals(&self) -> Decimals {
        self.decimals
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn bar_color(&self) -> Color {
        self.bar_color
    }

    pub fn is_switched_on(&self) -> bool {
        self.switched_on
    }

    pub fn set_decimals(&mut self, decimals: Decimals) {
        self.decimals = decimals;
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    pub fn set_bar_color(&mut self, color: Color) {
        self.bar_color = color;
    }

    pub fn set_value(&mut self, value: f64) {
        if let Some(value) = self.domain.set_value(value) {
            self.emit(RegulatorEvent::ValueChanged(value));
        }
    }

    pub fn set_min_value(&mut self, min: f64) {
        let before = self.domain.value();
        self.domain.set_min(min);
        self.announce_reclamp(before);
    }

    pub fn set_max_value(&mut self, max: f64) {
        let before = self.domain.value();
        self.domain.set_max(max);
        self.announce_reclamp(before);
    }

    pub fn set_domain(&mut self, min: f64, max: f64) {
        let before = self.domain.value();
        self.domain.set_domain(min, max);
        self.announce_reclamp(before);
    }

    fn announce_reclamp(&mut self, before: f64) {
        log::debug!(
            "Domain is now [{}, {}], angle step {}",
            self.domain.min(),
            self.domain.max(),
            self.angle_step()
        );
        let after = self.domain.value();
        if after != before {
            self.emit(RegulatorEvent::ValueChanged(after));
        }
    }

    /// Replaces the gradient, switching a plain regulator into color mode.
    /// On error the previous gradient stays in place.
    pub fn set_stops(
        &mut self,
        stops: impl IntoIterator<Item = GradientStop>,
    ) -> Result<(), GradientError> {
        let wheel = GradientWheel::with_geometry(stops, &self.geometry)?;
        self.wheel = Some(wheel);
        Ok(())
    }

    pub fn switch_on(&mut self) {
        self.switch(true);
    }

    pub fn switch_off(&mut self) {
        self.switch(false);
    }

    fn switch(&mut self, on: bool) {
        if self.switched_on != on {
            self.switched_on = on;
            self.emit(RegulatorEvent::Switched(on));
        }
    }

    pub fn press(&mut self, center: Point, pointer: Point) -> PointerAction {
        if self.drag == DragState::Dragging {
            return PointerAction::default();
        }
        if let Some(ring) = self.ring
            && !ring.contains(center, pointer)
        {
            return PointerAction::default();
        }

        self.drag = DragState::Dragging;
        log::debug!("Drag started at ({}, {})", pointer.x, pointer.y);
        self.apply_sample(center, pointer);
        PointerAction::new(true, false)
    }

    pub fn drag_to(&mut self, center: Point, pointer: Point) -> PointerAction {
        if self.drag != DragState::Dragging {
            return PointerAction::default();
        }
        PointerAction::new(self.apply_sample(center, pointer), false)
    }

    pub fn release(&mut self) -> PointerAction {
        if self.drag != DragState::Dragging {
            return PointerAction::default();
        }

        self.drag = DragState::Idle;
        let value = self.domain.value();
        log::debug!("Drag committed at {value}");
        self.emit(RegulatorEvent::TargetCommitted(value));
        PointerAction::new(false, true)
    }

    fn apply_sample(&mut self, center: Point, pointer: Point) -> bool {
        match self
            .geometry
            .pointer_to_value(center, pointer, &self.domain)
        {
            Ok(value) => {
                self.set_value(value);
                true
            }
            Err(e) => {
                log::trace!("Ignoring drag sample: {e}");
                false
            }
        }
    }
}
