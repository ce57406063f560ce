//! This module defines the `loader` component, the spinner shown while a
//! tracked operation is in flight.
//!
//! Whether it is visible at all is decided elsewhere, by the loading
//! service's delayed-visibility signal; this component only draws.

use leptos::{
    html::{div, p},
    prelude::*,
    svg::{circle, svg},
};

/// Renders the loading spinner with its message.
pub fn component() -> impl IntoView {
    div()
        .class("flex absolute inset-0 flex-col gap-1 justify-center items-center m-auto")
        .child((
            svg()
                .attr("viewBox", "0 0 24 24")
                .attr("fill", "none")
                .class("size-8 animate-spin")
                .child(
                    circle()
                        .attr("cx", "12")
                        .attr("cy", "12")
                        .attr("r", "10")
                        .attr("stroke", "currentColor")
                        .attr("stroke-width", "3")
                        .attr("stroke-dasharray", "45 20"),
                ),
            p().class("text-sm italic text-gray-400").child("Loading..."),
        ))
}
