//! Fixed column layout of the world car sales export.
//!
//! Positions are zero-based and never inferred from the header line.

/// Every column of the export, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Column {
    SaleId = 0,
    SaleDate,
    Country,
    Region,
    Latitude,
    Longitude,
    DealershipId,
    DealershipName,
    Manufacturer,
    Model,
    VehicleYear,
    BodyType,
    FuelType,
    Transmission,
    Drivetrain,
    Color,
    Vin,
    Condition,
    PreviousOwners,
    OdometerKm,
    SalePriceUsd,
    Currency,
    Financing,
    PaymentType,
    SalesChannel,
    BuyerId,
    BuyerAge,
    BuyerGender,
    BuyerIncomeUsd,
    SalespersonId,
    SalespersonName,
    WarrantyMonths,
    WarrantyProvider,
    Features,
    Co2GKm,
    MpgCity,
    MpgHighway,
    EngineDisplacementL,
    Horsepower,
    TorqueNm,
    DealerRating,
    ConditionNotes,
    ServiceHistory,
}

/// Rows narrower than this cannot carry a sale price and are skipped.
pub const MINIMUM_FIELD_COUNT: usize = Column::SalePriceUsd.index() + 1;

impl Column {
    /// All columns in file order.
    pub const ALL: [Column; 43] = [
        Column::SaleId,
        Column::SaleDate,
        Column::Country,
        Column::Region,
        Column::Latitude,
        Column::Longitude,
        Column::DealershipId,
        Column::DealershipName,
        Column::Manufacturer,
        Column::Model,
        Column::VehicleYear,
        Column::BodyType,
        Column::FuelType,
        Column::Transmission,
        Column::Drivetrain,
        Column::Color,
        Column::Vin,
        Column::Condition,
        Column::PreviousOwners,
        Column::OdometerKm,
        Column::SalePriceUsd,
        Column::Currency,
        Column::Financing,
        Column::PaymentType,
        Column::SalesChannel,
        Column::BuyerId,
        Column::BuyerAge,
        Column::BuyerGender,
        Column::BuyerIncomeUsd,
        Column::SalespersonId,
        Column::SalespersonName,
        Column::WarrantyMonths,
        Column::WarrantyProvider,
        Column::Features,
        Column::Co2GKm,
        Column::MpgCity,
        Column::MpgHighway,
        Column::EngineDisplacementL,
        Column::Horsepower,
        Column::TorqueNm,
        Column::DealerRating,
        Column::ConditionNotes,
        Column::ServiceHistory,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Header name as written in the export.
    pub const fn header(self) -> &'static str {
        match self {
            Column::SaleId => "sale_id",
            Column::SaleDate => "sale_date",
            Column::Country => "country",
            Column::Region => "region",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::DealershipId => "dealership_id",
            Column::DealershipName => "dealership_name",
            Column::Manufacturer => "manufacturer",
            Column::Model => "model",
            Column::VehicleYear => "vehicle_year",
            Column::BodyType => "body_type",
            Column::FuelType => "fuel_type",
            Column::Transmission => "transmission",
            Column::Drivetrain => "drivetrain",
            Column::Color => "color",
            Column::Vin => "vin",
            Column::Condition => "condition",
            Column::PreviousOwners => "previous_owners",
            Column::OdometerKm => "odometer_km",
            Column::SalePriceUsd => "sale_price_usd",
            Column::Currency => "currency",
            Column::Financing => "financing",
            Column::PaymentType => "payment_type",
            Column::SalesChannel => "sales_channel",
            Column::BuyerId => "buyer_id",
            Column::BuyerAge => "buyer_age",
            Column::BuyerGender => "buyer_gender",
            Column::BuyerIncomeUsd => "buyer_income_usd",
            Column::SalespersonId => "salesperson_id",
            Column::SalespersonName => "salesperson_name",
            Column::WarrantyMonths => "warranty_months",
            Column::WarrantyProvider => "warranty_provider",
            Column::Features => "features",
            Column::Co2GKm => "co2_g_km",
            Column::MpgCity => "mpg_city",
            Column::MpgHighway => "mpg_highway",
            Column::EngineDisplacementL => "engine_displacement_l",
            Column::Horsepower => "horsepower",
            Column::TorqueNm => "torque_nm",
            Column::DealerRating => "dealer_rating",
            Column::ConditionNotes => "condition_notes",
            Column::ServiceHistory => "service_history",
        }
    }
}
