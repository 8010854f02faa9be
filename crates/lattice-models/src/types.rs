//! # Enumeration Tables
//!
//! The closed string enums referenced by model fields. Wire strings match
//! the server's constants exactly; the tables are frozen at compile time.

use lattice_core::string_enum;

string_enum! {
    /// A permission that can be granted on a securable object.
    pub enum PermissionType {
        /// Full control, including granting permissions to others.
        Owner => "OWNER",
        /// Read data.
        Read => "READ",
        /// Write data.
        Write => "WRITE",
        /// See that the object exists.
        Discover => "DISCOVER",
        /// Use the object in a linking operation.
        Link => "LINK",
        /// Materialize the object into an organization database.
        Materialize => "MATERIALIZE",
    }
}

string_enum! {
    /// How an [`AclData`](crate::AclData) update applies its aces.
    pub enum ActionType {
        /// Add permissions.
        Add => "ADD",
        /// Remove permissions.
        Remove => "REMOVE",
        /// Request permissions.
        Request => "REQUEST",
        /// Replace permissions.
        Set => "SET",
    }
}

string_enum! {
    /// The kind of a [`Principal`](crate::Principal).
    pub enum PrincipalType {
        /// An organization.
        Organization => "ORGANIZATION",
        /// A role within an organization.
        Role => "ROLE",
        /// An individual user.
        User => "USER",
    }
}

string_enum! {
    /// Lifecycle state of a permission request.
    pub enum RequestStateType {
        /// Awaiting a decision.
        Submitted => "SUBMITTED",
        /// Granted.
        Approved => "APPROVED",
        /// Refused.
        Declined => "DECLINED",
    }
}

string_enum! {
    /// The kind of object an acl key points at.
    pub enum SecurableType {
        /// An association type.
        AssociationType => "AssociationType",
        /// A complex type.
        ComplexType => "ComplexType",
        /// An edge type.
        EdgeType => "EdgeType",
        /// An entity set.
        EntitySet => "EntitySet",
        /// An entity type.
        EntityType => "EntityType",
        /// A linking entity type.
        LinkingEntityType => "LinkingEntityType",
        /// An organization.
        Organization => "Organization",
        /// A property type scoped to an entity set.
        PropertyTypeInEntitySet => "PropertyTypeInEntitySet",
    }
}

string_enum! {
    /// Primitive datatypes a property type can hold.
    pub enum EdmPrimitiveType {
        Binary => "Binary",
        Boolean => "Boolean",
        Byte => "Byte",
        Date => "Date",
        DateTimeOffset => "DateTimeOffset",
        Decimal => "Decimal",
        Double => "Double",
        Duration => "Duration",
        GeographyPoint => "GeographyPoint",
        Guid => "Guid",
        Int16 => "Int16",
        Int32 => "Int32",
        Int64 => "Int64",
        SByte => "SByte",
        Single => "Single",
        String => "String",
        TimeOfDay => "TimeOfDay",
    }
}

string_enum! {
    /// Full-text analyzer applied to a property type.
    pub enum AnalyzerType {
        Standard => "STANDARD",
        Metaphone => "METAPHONE",
        NotAnalyzed => "NOT_ANALYZED",
    }
}

string_enum! {
    /// Database index applied to a property type.
    pub enum IndexType {
        BTree => "BTREE",
        Gin => "GIN",
        Gist => "GIST",
        Hash => "HASH",
        Brin => "BRIN",
        SpGist => "SPGIST",
        None => "NONE",
    }
}

string_enum! {
    /// Flags describing how an entity set is used.
    pub enum EntitySetFlagType {
        Association => "ASSOCIATION",
        Audit => "AUDIT",
        External => "EXTERNAL",
        Linking => "LINKING",
    }
}
