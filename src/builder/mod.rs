//! Fluent builder for assembling a world and its derived-state driver.
//!
//! Declares root states and registers sub and computed types in one
//! chain, producing a ready `(SimWorld, DerivedDriver)` pair. Every adder
//! returns `Result` so configuration errors surface loudly at startup.

use crate::core::RootState;
use crate::derived::{ComputedState, DerivedDriver, SubState};
use crate::world::{ConfigError, SimWorld};

/// Builder over [`SimWorld`] and [`DerivedDriver`].
///
/// # Example
///
/// ```rust
/// use statecraft::builder::SimBuilder;
/// use statecraft::state_enum;
///
/// state_enum! {
///     enum AppState {
///         Menu,
///         InGame,
///     }
/// }
///
/// let (world, driver) = SimBuilder::new()
///     .root(AppState::Menu)
///     .unwrap()
///     .build();
///
/// assert_eq!(world.current::<AppState>(), Some(&AppState::Menu));
/// assert!(driver.is_empty());
/// ```
pub struct SimBuilder {
    world: SimWorld,
    driver: DerivedDriver,
}

impl SimBuilder {
    /// Start with an empty world.
    pub fn new() -> Self {
        Self {
            world: SimWorld::new(),
            driver: DerivedDriver::new(),
        }
    }

    /// Declare a top-level state type with its initial value.
    pub fn root<S: RootState>(mut self, initial: S) -> Result<Self, ConfigError> {
        self.world.declare(initial)?;
        Ok(self)
    }

    /// Register a sub-state type and add its gate to the driver.
    pub fn sub<S: SubState>(mut self) -> Result<Self, ConfigError> {
        self.world.register_sub::<S>()?;
        self.driver.add_sub::<S>();
        Ok(self)
    }

    /// Register a computed state type and add its resolver to the driver.
    pub fn computed<C: ComputedState>(mut self) -> Result<Self, ConfigError> {
        self.world.register_computed::<C>()?;
        self.driver.add_computed::<C>();
        Ok(self)
    }

    /// Finish, yielding the world and the depth-ordered driver.
    pub fn build(self) -> (SimWorld, DerivedDriver) {
        (self.world, self.driver)
    }
}

impl Default for SimBuilder {
    fn default() -> Self {
        Self::new()
    }
}
