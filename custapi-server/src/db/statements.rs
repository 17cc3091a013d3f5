//! Statement templates for the `customer` table
//!
//! Every value is a `?` placeholder. Column lists follow [`Column::ALL`].
//!
//! [`Column::ALL`]: crate::models::Column::ALL

pub const SELECT_ALL: &str = "SELECT * FROM customer";

/// Row count, returned in a column named `total`.
pub const COUNT_ALL: &str = "SELECT COUNT(*) AS total FROM customer";

pub const SELECT_BY_CODE: &str = "SELECT * FROM customer WHERE CUST_CODE = ?";

pub const INSERT: &str = "INSERT INTO customer (CUST_CODE, CUST_NAME, CUST_CITY, WORKING_AREA, \
     CUST_COUNTRY, GRADE, OPENING_AMT, RECEIVE_AMT, PAYMENT_AMT, OUTSTANDING_AMT, PHONE_NO, \
     AGENT_CODE) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Insert-or-overwrite keyed on CUST_CODE.
pub const REPLACE: &str = "REPLACE INTO customer (CUST_CODE, CUST_NAME, CUST_CITY, WORKING_AREA, \
     CUST_COUNTRY, GRADE, OPENING_AMT, RECEIVE_AMT, PAYMENT_AMT, OUTSTANDING_AMT, PHONE_NO, \
     AGENT_CODE) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

pub const DELETE_BY_CODE: &str = "DELETE FROM customer WHERE CUST_CODE = ?";

/// Prefix shared by every partial update.
pub const UPDATE_PREFIX: &str = "UPDATE customer SET ";

/// Suffix shared by every partial update.
pub const UPDATE_SUFFIX: &str = " WHERE CUST_CODE = ?";

/// UPDATE statement around an already-built SET fragment.
pub(crate) fn update(assignments: &str) -> String {
    format!("{UPDATE_PREFIX}{assignments}{UPDATE_SUFFIX}")
}
