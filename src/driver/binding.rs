//! Texture binding cache and scoped binding.
//!
//! The texture bound to each unit is global per context. Everything that needs
//! a texture bound goes through [`ScopedTextureBinding`], which restores the
//! previous binding when it goes out of scope, including early returns.

use std::ops::{Deref, DerefMut};

use super::Driver;
use crate::backend::{consts, GlContext};

/// Which texture is bound to each texture unit.
///
/// Native bind calls are only issued when the cached value changes.
#[derive(Debug, Clone)]
pub struct TextureCache<T> {
    units: Vec<Option<T>>,
    active_unit: Option<u32>,
}

impl<T: Copy + Eq> TextureCache<T> {
    /// Create a cache for `unit_count` texture units, all unbound.
    pub fn new(unit_count: u32) -> Self {
        Self {
            units: vec![None; unit_count as usize],
            active_unit: None,
        }
    }

    /// Number of tracked units.
    pub fn unit_count(&self) -> u32 {
        self.units.len() as u32
    }

    /// Texture bound to `unit`.
    pub fn get(&self, unit: u32) -> Option<T> {
        self.units.get(unit as usize).copied().flatten()
    }

    /// Returns true if `texture` is bound to any unit.
    pub fn contains(&self, texture: T) -> bool {
        self.units.contains(&Some(texture))
    }

    /// Bind `texture` to `unit`. Returns false if the unit does not exist.
    pub(crate) fn set<C>(&mut self, gl: &mut C, unit: u32, texture: Option<T>) -> bool
    where
        C: GlContext<Texture = T>,
    {
        let Some(slot) = self.units.get_mut(unit as usize) else {
            log::error!("texture unit {} out of range", unit);
            return false;
        };
        if *slot == texture {
            return true;
        }
        if self.active_unit != Some(unit) {
            gl.active_texture(unit);
            self.active_unit = Some(unit);
        }
        gl.bind_texture(consts::TEXTURE_2D, texture);
        *slot = texture;
        true
    }

    /// Unbind `texture` from every unit it is bound to.
    pub(crate) fn remove<C>(&mut self, gl: &mut C, texture: T)
    where
        C: GlContext<Texture = T>,
    {
        for unit in 0..self.unit_count() {
            if self.get(unit) == Some(texture) {
                self.set(gl, unit, None);
            }
        }
    }
}

/// Binds a texture to unit 0 for the lifetime of the guard.
///
/// Dereferences to the driver so calls can be made while the binding is held.
pub struct ScopedTextureBinding<'a, C: GlContext> {
    driver: &'a mut Driver<C>,
    previous: Option<C::Texture>,
}

impl<'a, C: GlContext> ScopedTextureBinding<'a, C> {
    /// Bind `texture`, remembering what unit 0 held before.
    pub fn new(driver: &'a mut Driver<C>, texture: C::Texture) -> Self {
        let previous = driver.bound_texture(0);
        driver.set_texture(0, Some(texture));
        Self { driver, previous }
    }

    /// Texture that will be restored on drop.
    pub fn previous(&self) -> Option<C::Texture> {
        self.previous
    }
}

impl<C: GlContext> Deref for ScopedTextureBinding<'_, C> {
    type Target = Driver<C>;

    fn deref(&self) -> &Self::Target {
        self.driver
    }
}

impl<C: GlContext> DerefMut for ScopedTextureBinding<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.driver
    }
}

impl<C: GlContext> Drop for ScopedTextureBinding<'_, C> {
    fn drop(&mut self) {
        self.driver.set_texture(0, self.previous);
    }
}
