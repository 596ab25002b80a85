//! Concrete state handler functions and table builder.
//!
//! ```text
//!                   [closed → open edge]
//!   CLOSED_COUNTING ────────────────────▶ OPEN_ALERT
//!         ▲                                   │
//!         └───────[open → closed edge]────────┘
//!            (session reset on entry)
//! ```

use super::context::{FsmContext, ScreenRequest};
use super::{StateDescriptor, StateId};
use crate::elapsed::format_elapsed;
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — ClosedCounting
        StateDescriptor {
            id: StateId::ClosedCounting,
            name: "ClosedCounting",
            on_enter: Some(closed_enter),
            on_exit: None,
            on_update: closed_update,
        },
        // Index 1 — OpenAlert
        StateDescriptor {
            id: StateId::OpenAlert,
            name: "OpenAlert",
            on_enter: Some(open_enter),
            on_exit: Some(open_exit),
            on_update: open_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSED_COUNTING — door shut, elapsed time on screen
// ═══════════════════════════════════════════════════════════════════════════

fn closed_enter(ctx: &mut FsmContext) {
    ctx.begin_session();
    ctx.request = Some(ScreenRequest::ClearSession);
    info!("CLOSED: new session at t={}ms", ctx.now_ms);
}

fn closed_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.door.opened() {
        return Some(StateId::OpenAlert);
    }

    ctx.request = Some(ScreenRequest::ShowElapsed(format_elapsed(ctx.elapsed_secs())));
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPEN_ALERT — door open, static alert screen
// ═══════════════════════════════════════════════════════════════════════════

fn open_enter(ctx: &mut FsmContext) {
    // The session timer keeps its start; closing the door restarts it.
    ctx.request = Some(ScreenRequest::ShowAlert);
    info!("OPEN: door opened after {}s closed", ctx.elapsed_secs());
}

fn open_exit(ctx: &mut FsmContext) {
    info!("OPEN: cleared after {} ticks", ctx.ticks_in_state);
}

fn open_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.door.closed() {
        return Some(StateId::ClosedCounting);
    }
    None
}
