//! The customer column whitelist
//!
//! Statement text is only ever assembled from these names. Anything a client
//! submits is resolved against [`Column::from_name`] first.

/// Storage kind of a column, decides which JSON values it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Decimal,
}

/// A column of the `customer` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    CustCode,
    CustName,
    CustCity,
    WorkingArea,
    CustCountry,
    Grade,
    OpeningAmt,
    ReceiveAmt,
    PaymentAmt,
    OutstandingAmt,
    PhoneNo,
    AgentCode,
}

impl Column {
    /// All columns in table order. INSERT and REPLACE bind in this order.
    pub const ALL: [Column; 12] = [
        Column::CustCode,
        Column::CustName,
        Column::CustCity,
        Column::WorkingArea,
        Column::CustCountry,
        Column::Grade,
        Column::OpeningAmt,
        Column::ReceiveAmt,
        Column::PaymentAmt,
        Column::OutstandingAmt,
        Column::PhoneNo,
        Column::AgentCode,
    ];

    /// Primary key column.
    pub const KEY: Column = Column::CustCode;

    /// Column name as it appears in SQL and in JSON payloads.
    pub const fn name(self) -> &'static str {
        match self {
            Column::CustCode => "CUST_CODE",
            Column::CustName => "CUST_NAME",
            Column::CustCity => "CUST_CITY",
            Column::WorkingArea => "WORKING_AREA",
            Column::CustCountry => "CUST_COUNTRY",
            Column::Grade => "GRADE",
            Column::OpeningAmt => "OPENING_AMT",
            Column::ReceiveAmt => "RECEIVE_AMT",
            Column::PaymentAmt => "PAYMENT_AMT",
            Column::OutstandingAmt => "OUTSTANDING_AMT",
            Column::PhoneNo => "PHONE_NO",
            Column::AgentCode => "AGENT_CODE",
        }
    }

    pub const fn kind(self) -> ColumnKind {
        match self {
            Column::Grade => ColumnKind::Integer,
            Column::OpeningAmt
            | Column::ReceiveAmt
            | Column::PaymentAmt
            | Column::OutstandingAmt => ColumnKind::Decimal,
            _ => ColumnKind::Text,
        }
    }

    /// Required on creation and never nullable afterwards.
    pub const fn is_required(self) -> bool {
        matches!(self, Column::CustCode | Column::CustName | Column::CustCity)
    }

    /// Resolve a submitted field name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
