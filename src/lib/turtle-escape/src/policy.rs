/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use crate::turtle::Turtle;

/// Decision logic for steering a turtle.
///
/// The simulator calls `setup` once before the first tick and `update` once per tick after
/// that. Inside either hook the policy reads whatever it needs from the turtle (its pose,
/// the arena, obstacles, target) and calls `turn_left`, `turn_right` and `forward` as many
/// times as it likes.
///
/// Notice that the policy never sees the simulator. A policy that neither moves nor turns
/// during a tick gets its run stopped as a stall.
pub trait Policy {
    fn setup(&mut self, turtle: &mut Turtle<'_>);
    fn update(&mut self, turtle: &mut Turtle<'_>);
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn setup(&mut self, turtle: &mut Turtle<'_>) {
        (**self).setup(turtle);
    }

    fn update(&mut self, turtle: &mut Turtle<'_>) {
        (**self).update(turtle);
    }
}
