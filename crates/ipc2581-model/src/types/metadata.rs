/// Logistic header (order and supply chain information)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogisticHeader {
    pub roles: Vec<Role>,
    pub enterprises: Vec<Enterprise>,
    pub persons: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: String,
    pub role_function: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enterprise {
    pub id: String,
    pub code: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub enterprise_ref: Option<String>,
    pub email: Option<String>,
}
