use super::Parser;
use crate::tree::Element;
use crate::types::*;

impl Parser<'_> {
    pub(super) fn parse_logistic_header(&mut self, el: Element<'_, '_>) -> LogisticHeader {
        let mut header = LogisticHeader::default();

        for child in el.children() {
            match child.tag() {
                "Role" if child.is("Role") => header.roles.push(Role {
                    id: self.text_or_empty(child, "id"),
                    role_function: self.text(child, "roleFunction"),
                }),
                "Enterprise" if child.is("Enterprise") => header.enterprises.push(Enterprise {
                    id: self.text_or_empty(child, "id"),
                    code: self.text(child, "code"),
                    name: self.text(child, "name"),
                }),
                "Person" if child.is("Person") => header.persons.push(Person {
                    name: self.text_or_empty(child, "name"),
                    enterprise_ref: self.text(child, "enterpriseRef"),
                    email: self.text(child, "email"),
                }),
                _ => {}
            }
        }

        header
    }
}
