use wasm_bindgen::prelude::*;
use algo::{rule, universe, Error};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn js_error(e: Error) -> JsValue {
  js_sys::Error::new(&e.to_string()).into()
}

#[wasm_bindgen]
pub struct Universe(universe::Universe);

#[wasm_bindgen]
impl Universe {
  /// Row of `2 * span + 1` cells with only the middle one active.
  #[wasm_bindgen(constructor)]
  pub fn new(span: u32) -> Result<Universe, JsValue> {
    let mut uni = universe::Universe::with_anchor(span as usize, universe::Anchor::Centered)
      .map_err(js_error)?;
    uni.seed_center();
    Ok(Self(uni))
  }

  pub fn span(&self) -> u32 {
    self.0.span() as u32
  }

  pub fn width(&self) -> u32 {
    self.0.width() as u32
  }

  /// Replaces the row with a fresh seeded one of the new span.
  pub fn set_span(&mut self, span: u32) -> Result<(), JsValue> {
    self.0.reset(span as usize).map_err(js_error)?;
    self.0.seed_center();
    Ok(())
  }

  /// Copy of the packed cells: bit `n % 8` of byte `n / 8` is cell `n`.
  pub fn cells(&self) -> js_sys::Uint8Array {
    js_sys::Uint8Array::from(self.0.cells())
  }

  /// Address of the packed cells in wasm memory, valid until the next call
  /// that mutates this universe. Read `cells_len()` bytes from it.
  pub fn cells_ptr(&self) -> *const u8 {
    self.0.cells().as_ptr()
  }

  pub fn cells_len(&self) -> usize {
    self.0.cells().len()
  }

  pub fn count_active(&self) -> u32 {
    self.0.count_active() as u32
  }

  pub fn get(&self, index: usize) -> Result<bool, JsValue> {
    self.0.get(index).map_err(js_error)
  }

  pub fn set(&mut self, index: usize, alive: bool) -> Result<(), JsValue> {
    self.0.set(index, alive).map_err(js_error)
  }

  pub fn seed_center(&mut self) {
    self.0.seed_center()
  }

  pub fn randomize(&mut self, seed: u32) {
    self.0.randomize(&mut StdRng::seed_from_u64(seed as u64))
  }

  /// `leading` or `centered`.
  pub fn set_anchor(&mut self, anchor: &str) -> Result<(), JsValue> {
    self.0.set_anchor(anchor.parse().map_err(js_error)?);
    Ok(())
  }

  pub fn tick(&mut self, pattern: &Pattern) -> Result<(), JsValue> {
    self.0.step(&pattern.0).map_err(js_error)
  }
}

#[wasm_bindgen]
pub struct Pattern(rule::RuleTable);

#[wasm_bindgen]
impl Pattern {
  #[wasm_bindgen(constructor)]
  pub fn new(window: u32) -> Result<Pattern, JsValue> {
    Ok(Self(rule::RuleTable::new(window).map_err(js_error)?))
  }

  pub fn elementary(number: u8) -> Pattern {
    Self(rule::RuleTable::elementary(number))
  }

  /// `W<window>:<hex>` or `R<number>`.
  pub fn parse(src: &str) -> Result<Pattern, JsValue> {
    Ok(Self(src.parse().map_err(js_error)?))
  }

  pub fn window(&self) -> u32 {
    self.0.window()
  }

  pub fn get_outcome(&self, index: usize) -> Result<bool, JsValue> {
    self.0.get_outcome(index).map_err(js_error)
  }

  pub fn set_outcome(&mut self, index: usize, outcome: bool) -> Result<(), JsValue> {
    self.0.set_outcome(index, outcome).map_err(js_error)
  }

  #[wasm_bindgen(js_name = toString)]
  pub fn to_rule_string(&self) -> String {
    self.0.to_string()
  }
}
