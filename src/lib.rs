//! # uart-mmio
//!
//! Polled driver for a single memory-mapped UART peripheral. The device sits
//! behind five 32-bit registers at a fixed base address: control, baud/format,
//! status, transmit data and receive data. The driver brings the device into a
//! known operating mode (115200, no parity, one stop bit, no flow control) and
//! offers byte-at-a-time transmit and receive with a bounded busy-wait on the
//! status register.
//!
//! ## Module Overview
//! - [`config`] – operating-mode enums and the packed register encoding.
//! - [`bus`]    – the register-access seam, with MMIO and mock backings.
//! - [`uart`]   – the [`Uart`] handle: initialize, transmit, receive.
//! - [`error`]  – the error taxonomy shared by every operation.
//!
//! All register access goes through the [`RegisterBus`] trait so the driver
//! runs identically against real hardware ([`MmioBus`]) or an in-memory
//! register file ([`MockBus`]) during tests:
//!
//! ```
//! use uart_mmio::{MockBus, Uart};
//!
//! let mut uart = Uart::new(MockBus::new());
//! uart.initialize().unwrap();
//!
//! uart.bus_mut().set_tx_ready();
//! uart.write_byte(b'A').unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bus;
pub mod config;
pub mod error;
pub mod uart;

pub use bus::{AnyBus, MmioBus, MockBus, RegisterBus};
pub use config::{BaudRate, FlowControl, Parity, StopBits, UartConfig};
pub use error::{UartError, UartResult};
pub use uart::{Uart, UART_BASE};
