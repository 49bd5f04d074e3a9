//! The UART handle: device bring-up and polled byte transfer

use crate::bus::{self, AnyBus, MmioBus, MockBus, RegisterBus};
use crate::config::UartConfig;
use crate::error::{UartError, UartResult};

/// Platform base address of the UART register window.
pub const UART_BASE: usize = 0xFC00_0000;

/// Handle to the UART device.
///
/// Created uninitialized; [`initialize`](Uart::initialize) must succeed
/// before [`write_byte`](Uart::write_byte) or
/// [`read_byte`](Uart::read_byte) will touch a register. The handle is the
/// single owner of its register backing — it is not `Clone`, and every
/// operation takes `&mut self`, so two handles cannot race on the device's
/// read-clears/write-clears status flags. Callers needing shared access
/// must serialize externally.
pub struct Uart<B> {
    bus: B,
    config: UartConfig,
    initialized: bool,
}

impl Uart<AnyBus> {
    /// Opens the device, selecting the register backing per `use_mock`.
    ///
    /// With `use_mock` clear the handle binds to the platform window at
    /// [`UART_BASE`]; with it set the handle runs against an in-memory
    /// [`MockBus`], suitable for tests on machines without the device.
    pub fn open(use_mock: bool) -> UartResult<Self> {
        let backing = if use_mock {
            AnyBus::Mock(MockBus::new())
        } else {
            AnyBus::Mmio(MmioBus::new(UART_BASE)?)
        };
        Ok(Self::new(backing))
    }
}

impl<B: RegisterBus> Uart<B> {
    /// Creates an uninitialized handle over `bus` with the default
    /// operating mode (115200, no parity, one stop bit, no flow control).
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, UartConfig::default())
    }

    /// Creates an uninitialized handle with an explicit configuration.
    pub fn with_config(bus: B, config: UartConfig) -> Self {
        Self {
            bus,
            config,
            initialized: false,
        }
    }

    /// Whether a successful [`initialize`](Uart::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The register backing.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// The register backing, mutably (mock setup in tests).
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Brings the device into its operating mode.
    ///
    /// Enables TX/RX and the status-change interrupt, then programs the
    /// packed baud/format word. Calling it again rewrites the same words;
    /// re-initialization is safe.
    pub fn initialize(&mut self) -> UartResult<()> {
        self.bus.write32(bus::CNR, self.config.control_word());
        self.bus.write32(bus::BRR, self.config.line_word());
        self.initialized = true;

        log::info!(
            "uart: initialized, ctrl={:#x} line={:#x}",
            self.config.control_word(),
            self.config.line_word()
        );
        Ok(())
    }

    /// Transmits one byte once the device reports TX ready.
    ///
    /// The TDR write clears TX ready until the device can take the next
    /// byte; this call does not re-check afterwards, the next call
    /// re-polls. On [`Timeout`](UartError::Timeout) the byte is discarded,
    /// never half-written, and the handle stays usable.
    pub fn write_byte(&mut self, byte: u8) -> UartResult<()> {
        self.ensure_initialized()?;
        self.wait_ready(bus::STA_TX_READY)?;

        self.bus.write32(bus::TDR, u32::from(byte));
        Ok(())
    }

    /// Receives one byte once the device reports RX ready.
    ///
    /// Exactly one RDR read is issued; the hardware clears RX ready as a
    /// side effect of that read.
    pub fn read_byte(&mut self) -> UartResult<u8> {
        self.ensure_initialized()?;
        self.wait_ready(bus::STA_RX_READY)?;

        Ok(self.bus.read32(bus::RDR) as u8)
    }

    fn ensure_initialized(&self) -> UartResult<()> {
        if !self.initialized {
            log::warn!("uart: operation attempted before initialize");
            return Err(UartError::NotInitialized);
        }
        Ok(())
    }

    /// Busy-waits until `bit` is set in the status register, re-reading
    /// the register each iteration, bounded by the configured poll limit.
    fn wait_ready(&mut self, bit: u32) -> UartResult<()> {
        for _ in 0..self.config.poll_limit {
            if self.bus.read32(bus::STA) & bit != 0 {
                return Ok(());
            }
            core::hint::spin_loop();
        }

        log::warn!(
            "uart: status bit {:#x} never set within {} polls",
            bit,
            self.config.poll_limit
        );
        Err(UartError::Timeout)
    }
}
