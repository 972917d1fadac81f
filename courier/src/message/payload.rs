/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */
use std::any::Any;
use std::fmt::Debug;

use dyn_clone::DynClone;

/// An opaque value carried alongside a message's text content.
///
/// The runtime never inspects a payload; receivers recover the concrete type
/// with [`Message::payload_as`](crate::message::Message::payload_as).
///
/// A blanket implementation covers every `Clone + Debug + Send + Sync + 'static`
/// type, so application structs only need the usual derives.
pub trait Payload: DynClone + Any + Send + Sync + Debug {
    /// Returns the payload as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;
}

dyn_clone::clone_trait_object!(Payload);

impl<T> Payload for T
where
    T: Any + Send + Sync + Debug + DynClone + 'static,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}
