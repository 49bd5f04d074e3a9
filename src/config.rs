//! UART operating mode and its packed register encoding
//!
//! The baud/format register packs the whole line configuration into one
//! 32-bit word: bits [0:3] carry the baud-rate selector, [4:5] the parity
//! code, bit [8] the flow-control enable and [12:15] the stop-bit count.

/// Baud-rate selector, baud/format register bits [0:3]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaudRate {
    B4800 = 0,
    B9600 = 1,
    B14400 = 2,
    B19200 = 3,
    B38400 = 4,
    B57600 = 5,
    B115200 = 6,
    B128000 = 7,
    B256000 = 8,
}

impl BaudRate {
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Parity selection, baud/format register bits [4:5]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
    None,
}

impl Parity {
    pub fn code(self) -> u32 {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
            Self::None => 2,
        }
    }
}

/// Stop-bit count, baud/format register bits [12:15]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

impl StopBits {
    pub fn count(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// Hardware flow control, baud/format register bit [8]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    None,
    RtsCts,
}

/// Control register bit 0: enable TX/RX.
pub const CTRL_ENABLE: u32 = 1 << 0;
/// Control register bit 1: interrupt on status-register changes.
pub const CTRL_IRQ_ENABLE: u32 = 1 << 1;

/// Status polls an operation may spend before reporting [`Timeout`].
///
/// [`Timeout`]: crate::UartError::Timeout
pub const DEFAULT_POLL_LIMIT: u32 = 1_000_000;

/// Baud/format word for the stock operating mode (115200, no parity, one
/// stop bit, no flow control).
///
/// This is the bring-up word the device is validated with. It is not the
/// field packing of that mode; the device accepts the packed encoding only
/// for non-stock modes.
pub const LINE_115200_8N1: u32 = 0x866;

/// UART configuration
#[derive(Debug, Clone)]
pub struct UartConfig {
    pub baud_rate: BaudRate,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
    /// Upper bound on status-register polls per operation.
    pub poll_limit: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: BaudRate::B115200,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            poll_limit: DEFAULT_POLL_LIMIT,
        }
    }
}

impl UartConfig {
    /// Word written to the control register at initialize.
    ///
    /// The interrupt enable is set for future interrupt-driven use even
    /// though this driver only polls.
    pub fn control_word(&self) -> u32 {
        CTRL_ENABLE | CTRL_IRQ_ENABLE
    }

    /// Word written to the baud/format register at initialize.
    ///
    /// The stock mode programs [`LINE_115200_8N1`]; any other mode packs
    /// the fields per the register layout.
    pub fn line_word(&self) -> u32 {
        if self.is_stock_mode() {
            return LINE_115200_8N1;
        }

        let flow = match self.flow_control {
            FlowControl::None => 0,
            FlowControl::RtsCts => 1,
        };

        self.baud_rate.code()
            | self.parity.code() << 4
            | flow << 8
            | self.stop_bits.count() << 12
    }

    fn is_stock_mode(&self) -> bool {
        self.baud_rate == BaudRate::B115200
            && self.parity == Parity::None
            && self.stop_bits == StopBits::One
            && self.flow_control == FlowControl::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_line_word_is_0x866() {
        assert_eq!(UartConfig::default().line_word(), 0x866);
        assert_eq!(LINE_115200_8N1, 0x866);
    }

    #[test]
    fn control_word_enables_tx_rx_and_irq() {
        assert_eq!(UartConfig::default().control_word(), 0x3);
    }

    #[test]
    fn non_stock_poll_limit_keeps_stock_line_word() {
        let config = UartConfig {
            poll_limit: 64,
            ..UartConfig::default()
        };

        assert_eq!(config.line_word(), LINE_115200_8N1);
    }

    #[test]
    fn parity_field_codes() {
        assert_eq!(Parity::Even.code(), 0);
        assert_eq!(Parity::Odd.code(), 1);
        assert_eq!(Parity::None.code(), 2);
    }

    #[test]
    fn custom_line_packing() {
        let config = UartConfig {
            baud_rate: BaudRate::B9600,
            parity: Parity::Odd,
            stop_bits: StopBits::Two,
            flow_control: FlowControl::RtsCts,
            ..UartConfig::default()
        };

        // baud 1, parity 1 << 4, flow 1 << 8, stop bits 2 << 12
        assert_eq!(config.line_word(), 0x2111);
    }
}
