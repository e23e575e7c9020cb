use crate::err::Result;

/// Opens connections to the target data source using a loaded driver
pub trait Connector {
    type TConnection: Connection;

    /// Loads and registers the driver with the supplied class name
    fn load_driver(&mut self, driver_class: &str) -> Result<()>;

    /// Opens a connection to the supplied url
    fn connect(&self, url: &str) -> Result<Self::TConnection>;
}

/// An open connection
pub trait Connection {
    type TResultSet: ResultSet;

    /// Executes the supplied query, returning its result set
    fn execute_query(&mut self, query: &str) -> Result<Self::TResultSet>;

    /// Closes the connection
    fn close(&mut self) -> Result<()>;
}

/// A cursor over the rows returned by a query
pub trait ResultSet {
    /// Advances to the next row, returning false once the rows are exhausted
    fn next(&mut self) -> Result<bool>;

    /// Gets the number of columns in each row
    fn column_count(&self) -> Result<usize>;

    /// Gets the value of the column (1-based) in the current row as a string
    /// Returns None for null values
    fn get_string(&self, col: usize) -> Result<Option<String>>;

    /// Reads the current row as strings
    fn row(&self) -> Result<Vec<Option<String>>> {
        (1..=self.column_count()?)
            .map(|col| self.get_string(col))
            .collect()
    }
}
