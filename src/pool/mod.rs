
use std::collections::HashMap;

use bytes::Buf;
use log::warn;
use parking_lot::Mutex;

use crate::compound_packet::{unmarshal_compound_with, CompoundError, CompoundPacket};
use crate::error::Result;
use crate::packet::{next_frame, PacketKind, RtcpPacket};

pub const DEFAULT_MAX_IDLE_PER_KIND: usize = 64;

/// PoolConfig bounds how many released packets a [`PacketPool`] keeps around.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Idle instances kept per packet kind; releases beyond this are dropped.
    pub max_idle_per_kind: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            max_idle_per_kind: DEFAULT_MAX_IDLE_PER_KIND,
        }
    }
}

impl PoolConfig {
    pub fn with_max_idle_per_kind(mut self, max_idle_per_kind: usize) -> Self {
        self.max_idle_per_kind = max_idle_per_kind;
        self
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Reset instances waiting to be handed out.
    pub idle: usize,
    /// Instances handed out and not yet released.
    pub outstanding: usize,
}

#[derive(Debug, Default)]
struct PoolState {
    idle: HashMap<PacketKind, Vec<RtcpPacket>>,
    outstanding: HashMap<PacketKind, usize>,
}

impl PoolState {
    fn check_out(&mut self, kind: PacketKind) {
        *self.outstanding.entry(kind).or_default() += 1;
    }
}

/// PacketPool is a free list of packet instances keyed by [`PacketKind`].
///
/// Every instance handed out, either by [`acquire`](PacketPool::acquire) or by one of
/// the pooled decode calls, counts as outstanding until it is given back with
/// [`release`](PacketPool::release). Released instances are reset to the zero value
/// of their kind before anyone can acquire them again. The pool is safe to share
/// between threads.
#[derive(Debug, Default)]
pub struct PacketPool {
    config: PoolConfig,
    state: Mutex<PoolState>,
}

impl PacketPool {
    pub fn new(config: PoolConfig) -> Self {
        PacketPool {
            config,
            state: Mutex::new(PoolState::default()),
        }
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// Hands out a zero-valued packet of `kind`, reusing an idle one when available.
    pub fn acquire(&self, kind: PacketKind) -> RtcpPacket {
        let mut state = self.state.lock();
        state.check_out(kind);
        state
            .idle
            .get_mut(&kind)
            .and_then(|idle| idle.pop())
            .unwrap_or_else(|| RtcpPacket::empty(kind))
    }

    /// Takes a packet back. It is reset before it can be handed out again.
    pub fn release(&self, mut packet: RtcpPacket) {
        let kind = packet.kind();
        packet.reset();

        let mut state = self.state.lock();
        match state.outstanding.get_mut(&kind) {
            Some(n) if *n > 0 => *n -= 1,
            _ => {
                warn!("released a {kind} that was not handed out by this pool");
                return;
            }
        }

        let max_idle = self.config.max_idle_per_kind;
        let idle = state.idle.entry(kind).or_default();
        if idle.len() >= max_idle {
            warn!("pool already holds {max_idle} idle {kind} packets, dropping release");
            return;
        }
        idle.push(packet);
    }

    /// Releases every packet in `packets`.
    pub fn release_all<I>(&self, packets: I)
    where
        I: IntoIterator<Item = RtcpPacket>,
    {
        for p in packets {
            self.release(p);
        }
    }

    /// Decodes the first packet of `raw_data`; the result is outstanding until released.
    pub fn unmarshal_one<B>(&self, raw_data: &mut B) -> Result<(RtcpPacket, usize)>
    where
        B: Buf,
    {
        let before = raw_data.remaining();
        let p = self.unmarshal_pooled(raw_data)?;
        Ok((p, before - raw_data.remaining()))
    }

    /// Decodes a compound packet. Packets carried by a [`CompoundError`] are
    /// outstanding too and should be released by the caller.
    pub fn unmarshal_compound<B>(
        &self,
        raw_data: &mut B,
    ) -> std::result::Result<CompoundPacket, CompoundError>
    where
        B: Buf,
    {
        unmarshal_compound_with(raw_data, |buf| self.unmarshal_pooled(buf))
    }

    fn unmarshal_pooled<B>(&self, raw_data: &mut B) -> Result<RtcpPacket>
    where
        B: Buf,
    {
        let (kind, mut in_packet) = next_frame(raw_data)?;

        // decode over an idle shell so the buffers it owns are reused
        let mut p = self.acquire(kind);
        if let Err(err) = p.unmarshal_into(&mut in_packet) {
            self.release(p);
            return Err(err);
        }

        Ok(p)
    }

    /// Totals across all kinds.
    pub fn stats(&self) -> PoolStats {
        let state = self.state.lock();
        PoolStats {
            idle: state.idle.values().map(Vec::len).sum(),
            outstanding: state.outstanding.values().sum(),
        }
    }

    pub fn stats_for(&self, kind: PacketKind) -> PoolStats {
        let state = self.state.lock();
        PoolStats {
            idle: state.idle.get(&kind).map_or(0, Vec::len),
            outstanding: state.outstanding.get(&kind).copied().unwrap_or_default(),
        }
    }
}
