// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Context: explicit typed context scopes.
//!
//! Cross-tree values such as a theme or a notification sink are often
//! smuggled through ambient module-scope singletons. This crate replaces
//! that with an explicit mechanism: a [`ContextStack`] holds one scope per
//! mounted subtree root, values are provided into the innermost scope, and
//! reads walk innermost-first so a nested scope shadows its ancestors.
//! Mount and teardown are explicit calls ([`ContextStack::push_scope`] /
//! [`ContextStack::pop_scope`]); popping a scope drops every value it
//! provided.
//!
//! Values are keyed by their type, so each scope holds at most one value of
//! a given type and reads are statically typed.
//!
//! ```rust
//! use perch_context::ContextStack;
//!
//! #[derive(Debug, PartialEq)]
//! struct Theme(&'static str);
//!
//! let mut ctx = ContextStack::new();
//! ctx.provide(Theme("dark"));
//!
//! // A nested subtree shadows the outer theme while mounted...
//! ctx.push_scope();
//! ctx.provide(Theme("light"));
//! assert_eq!(ctx.get::<Theme>(), Some(&Theme("light")));
//!
//! // ...and teardown restores the outer value.
//! ctx.pop_scope();
//! assert_eq!(ctx.get::<Theme>(), Some(&Theme("dark")));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use hashbrown::HashMap;

/// One scope's worth of provided values, keyed by type.
#[derive(Default)]
struct Scope {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The stored values are type-erased; only their count is showable.
        f.debug_struct("Scope")
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}

/// A stack of typed context scopes.
///
/// The stack always holds a root scope, so [`ContextStack::provide`] is
/// infallible; nested scopes are pushed per subtree root and popped on
/// teardown. See the crate docs for the model.
#[derive(Debug)]
pub struct ContextStack {
    scopes: Vec<Scope>,
}

impl ContextStack {
    /// A stack holding only the root scope.
    pub fn new() -> Self {
        let mut scopes = Vec::new();
        scopes.push(Scope::default());
        Self { scopes }
    }

    /// Number of scopes, including the root. Useful for asserting balanced
    /// mount/teardown.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Mount a nested scope. Values provided afterwards land here and
    /// shadow outer scopes until [`ContextStack::pop_scope`].
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Tear down the innermost scope, dropping every value it provided.
    ///
    /// The root scope cannot be popped; returns `false` (and does nothing)
    /// when only the root remains.
    pub fn pop_scope(&mut self) -> bool {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            true
        } else {
            false
        }
    }

    /// Provide a value into the innermost scope, returning the value it
    /// replaced in that scope, if any.
    pub fn provide<T: 'static>(&mut self, value: T) -> Option<T> {
        let scope = self.scopes.last_mut().expect("root scope always present");
        scope
            .values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|boxed| boxed.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Remove a value of type `T` from the innermost scope only.
    ///
    /// Outer provisions of the same type become visible again.
    pub fn retract<T: 'static>(&mut self) -> Option<T> {
        let scope = self.scopes.last_mut().expect("root scope always present");
        scope
            .values
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Read the nearest provided value of type `T`, innermost scope first.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.values.get(&TypeId::of::<T>()))
            .and_then(|boxed| boxed.downcast_ref())
    }

    /// Mutable access to the nearest provided value of type `T`.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.values.get_mut(&TypeId::of::<T>()))
            .and_then(|boxed| boxed.downcast_mut())
    }
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Theme(&'static str);

    #[derive(Debug, PartialEq)]
    struct Toasts(u32);

    #[test]
    fn missing_value_reads_none() {
        let ctx = ContextStack::new();
        assert_eq!(ctx.get::<Theme>(), None);
    }

    #[test]
    fn root_scope_provides_and_reads() {
        let mut ctx = ContextStack::new();
        assert!(ctx.provide(Theme("dark")).is_none());
        assert_eq!(ctx.get::<Theme>(), Some(&Theme("dark")));
    }

    #[test]
    fn values_of_different_types_coexist() {
        let mut ctx = ContextStack::new();
        ctx.provide(Theme("dark"));
        ctx.provide(Toasts(3));
        assert_eq!(ctx.get::<Theme>(), Some(&Theme("dark")));
        assert_eq!(ctx.get::<Toasts>(), Some(&Toasts(3)));
    }

    #[test]
    fn reprovide_in_same_scope_returns_old_value() {
        let mut ctx = ContextStack::new();
        ctx.provide(Theme("dark"));
        assert_eq!(ctx.provide(Theme("light")), Some(Theme("dark")));
        assert_eq!(ctx.get::<Theme>(), Some(&Theme("light")));
    }

    #[test]
    fn inner_scope_shadows_and_teardown_restores() {
        let mut ctx = ContextStack::new();
        ctx.provide(Theme("dark"));

        ctx.push_scope();
        ctx.provide(Theme("light"));
        assert_eq!(ctx.get::<Theme>(), Some(&Theme("light")));
        // A type only the outer scope provides is still reachable.
        ctx.provide(Toasts(1));
        assert_eq!(ctx.get::<Toasts>(), Some(&Toasts(1)));

        assert!(ctx.pop_scope());
        assert_eq!(ctx.get::<Theme>(), Some(&Theme("dark")));
        // The inner scope's toasts died with it.
        assert_eq!(ctx.get::<Toasts>(), None);
    }

    #[test]
    fn retract_unshadows_the_outer_provision() {
        let mut ctx = ContextStack::new();
        ctx.provide(Theme("dark"));
        ctx.push_scope();
        ctx.provide(Theme("light"));

        assert_eq!(ctx.retract::<Theme>(), Some(Theme("light")));
        assert_eq!(ctx.get::<Theme>(), Some(&Theme("dark")));
        // Retracting again finds nothing in the inner scope.
        assert_eq!(ctx.retract::<Theme>(), None);
    }

    #[test]
    fn root_scope_cannot_be_popped() {
        let mut ctx = ContextStack::new();
        ctx.provide(Theme("dark"));
        assert!(!ctx.pop_scope());
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.get::<Theme>(), Some(&Theme("dark")));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut ctx = ContextStack::new();
        ctx.provide(Toasts(0));
        if let Some(toasts) = ctx.get_mut::<Toasts>() {
            toasts.0 += 1;
        }
        assert_eq!(ctx.get::<Toasts>(), Some(&Toasts(1)));
    }

    #[test]
    fn balanced_depth_tracking() {
        let mut ctx = ContextStack::new();
        assert_eq!(ctx.depth(), 1);
        ctx.push_scope();
        ctx.push_scope();
        assert_eq!(ctx.depth(), 3);
        ctx.pop_scope();
        ctx.pop_scope();
        assert_eq!(ctx.depth(), 1);
    }
}
